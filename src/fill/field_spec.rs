use serde::{Deserialize, Serialize};

use crate::error::{AssistError, Outcome};
use crate::executor::batch::{for_each_node, write_text};
use crate::node::host::DocumentHost;
use crate::traverse::walker::{collect_text_nodes, selection_roots};

/// A named pool of candidate values consumed in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub values: Vec<String>,
    /// Position of the next value; reset at the start of every fill.
    #[serde(skip)]
    pub cursor: usize,
}

impl FieldSpec {
    pub fn new(name: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            values: values.iter().map(|v| v.to_string()).collect(),
            cursor: 0,
        }
    }

    /// Take the value under the cursor and advance it, wrapping around.
    pub fn next_value(&mut self) -> Option<String> {
        if self.values.is_empty() {
            return None;
        }
        let value = self.values[self.cursor % self.values.len()].clone();
        self.cursor = (self.cursor + 1) % self.values.len();
        Some(value)
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

fn field_named(fields: &[FieldSpec], layer_name: &str) -> Option<usize> {
    let wanted = layer_name.to_lowercase();
    fields.iter().position(|f| f.name.to_lowercase() == wanted)
}

/// Fill text leaves under the selection with field values in traversal
/// order. A leaf named like a field takes that field's next value; any other
/// leaf takes the next field in turn. Each field cycles through its values
/// independently.
pub fn round_robin_fill<H: DocumentHost + ?Sized>(
    host: &mut H,
    fields: &mut [FieldSpec],
) -> Result<Outcome, AssistError> {
    if selection_roots(host).is_empty() {
        return Err(AssistError::empty_selection());
    }
    fields.iter_mut().for_each(FieldSpec::reset);

    let assignments: Vec<(String, String)> = {
        let targets: Vec<(String, String)> = selection_roots(host)
            .into_iter()
            .flat_map(collect_text_nodes)
            .map(|node| (node.id.clone(), node.name.clone()))
            .collect();

        let mut turn = 0;
        targets
            .into_iter()
            .filter_map(|(id, name)| {
                let idx = match field_named(fields, &name) {
                    Some(idx) => idx,
                    None if fields.is_empty() => return None,
                    None => {
                        turn += 1;
                        (turn - 1) % fields.len()
                    }
                };
                let value = fields[idx].next_value()?;
                Some((id, value))
            })
            .collect()
    };

    if assignments.is_empty() {
        return Err(AssistError::zero("선택된 영역에 텍스트가 없습니다."));
    }

    let ids: Vec<String> = assignments.iter().map(|(id, _)| id.clone()).collect();
    let mut values = assignments.into_iter().map(|(_, value)| value);
    let changed = for_each_node(host, &ids, "round_robin_fill", |h, id| {
        let value = values.next().unwrap_or_default();
        write_text(h, id, |_| value).map(|_| true)
    });

    if changed == 0 {
        return Err(AssistError::zero("선택된 영역에 텍스트가 없습니다."));
    }
    Ok(Outcome::new(
        changed,
        format!("{changed}개의 텍스트에 데이터를 순서대로 적용했습니다."),
    ))
}

/// Write the same value into every text leaf under the selection.
pub fn apply_dummy_data<H: DocumentHost + ?Sized>(
    host: &mut H,
    value: &str,
) -> Result<Outcome, AssistError> {
    if selection_roots(host).is_empty() {
        return Err(AssistError::empty_selection());
    }
    let changed = crate::executor::executor::fill_all_text(host, value, "apply_dummy_data");
    if changed == 0 {
        return Err(AssistError::zero("선택된 영역에 텍스트가 없습니다."));
    }
    Ok(Outcome::new(
        changed,
        format!("{changed}개의 텍스트에 데이터를 적용했습니다."),
    ))
}
