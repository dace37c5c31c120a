use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::{AssistError, Outcome};
use crate::executor::batch::{for_each_node, resolve};
use crate::node::fingerprint::stable_seed;
use crate::node::host::DocumentHost;
use crate::node::node_model::{Paint, ScaleMode};
use crate::traverse::walker::{find_fillable, selection_roots};

/// Smallest edge requested from the image service.
pub const MIN_IMAGE_SIZE: u32 = 100;

const PROFILE_IMAGES: [&str; 10] = [
    "https://i.pravatar.cc/300?img=1",
    "https://i.pravatar.cc/300?img=5",
    "https://i.pravatar.cc/300?img=9",
    "https://i.pravatar.cc/300?img=16",
    "https://i.pravatar.cc/300?img=20",
    "https://i.pravatar.cc/300?img=25",
    "https://i.pravatar.cc/300?img=32",
    "https://i.pravatar.cc/300?img=36",
    "https://i.pravatar.cc/300?img=41",
    "https://i.pravatar.cc/300?img=47",
];

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("image request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("image server returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("image response from {0} was empty")]
    Empty(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Profile,
    Cover,
    Post,
    Product,
    Nature,
    Food,
    Other,
}

impl FromStr for ImageKind {
    type Err = std::convert::Infallible;

    /// Unknown kinds fall back to `Other` (a generic photo).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "profile" => ImageKind::Profile,
            "cover" => ImageKind::Cover,
            "post" => ImageKind::Post,
            "product" => ImageKind::Product,
            "nature" => ImageKind::Nature,
            "food" => ImageKind::Food,
            _ => ImageKind::Other,
        })
    }
}

/// Placeholder image URL for a node of the given size. Edges below
/// `min_size` are raised to it.
pub fn image_url(kind: ImageKind, width: f64, height: f64, seed: u32, min_size: u32) -> String {
    let w = (width.round() as u32).max(min_size);
    let h = (height.round() as u32).max(min_size);

    match kind {
        ImageKind::Profile => PROFILE_IMAGES[seed as usize % PROFILE_IMAGES.len()].to_string(),
        ImageKind::Cover | ImageKind::Other => {
            format!("https://picsum.photos/seed/{seed}/{w}/{h}")
        }
        ImageKind::Post => format!("https://picsum.photos/seed/post{seed}/{w}/{h}"),
        ImageKind::Product => format!("https://picsum.photos/seed/product{seed}/{w}/{h}"),
        ImageKind::Nature => format!("https://picsum.photos/seed/nature{seed}/{w}/{h}"),
        ImageKind::Food => format!("https://picsum.photos/seed/food{seed}/{w}/{h}"),
    }
}

/// Where image bytes come from.
pub trait ImageSource {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

pub struct HttpImageSource {
    client: reqwest::blocking::Client,
}

impl HttpImageSource {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl ImageSource for HttpImageSource {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes()?;
        if bytes.is_empty() {
            return Err(FetchError::Empty(url.to_string()));
        }
        Ok(bytes.to_vec())
    }
}

/// Replace existing image paints (keeping their presentation) or, when there
/// are none, make the image the only paint.
fn with_image(fills: &[Paint], image_hash: &str) -> Vec<Paint> {
    if !fills.iter().any(Paint::is_image) {
        return vec![Paint::Image {
            image_hash: image_hash.to_string(),
            scale_mode: ScaleMode::Fill,
            visible: true,
            opacity: 1.0,
        }];
    }

    fills
        .iter()
        .map(|paint| match paint {
            Paint::Image {
                scale_mode,
                visible,
                opacity,
                ..
            } => Paint::Image {
                image_hash: image_hash.to_string(),
                scale_mode: *scale_mode,
                visible: *visible,
                opacity: *opacity,
            },
            other => other.clone(),
        })
        .collect()
}

/// Fetch a placeholder image for every fillable node under the selection and
/// install it as an image paint. Nodes are processed one at a time.
pub fn apply_image_fill<H, S>(
    host: &mut H,
    source: &S,
    kind: ImageKind,
    min_size: u32,
) -> Result<Outcome, AssistError>
where
    H: DocumentHost + ?Sized,
    S: ImageSource + ?Sized,
{
    let targets: Vec<String> = {
        let roots = selection_roots(host);
        if roots.is_empty() {
            return Err(AssistError::empty_selection());
        }
        find_fillable(&roots)
            .into_iter()
            .map(|node| node.id.clone())
            .collect()
    };

    if targets.is_empty() {
        return Err(AssistError::zero(
            "이미지를 적용할 수 있는 레이어가 없습니다. (Frame, Rectangle, Ellipse 등)",
        ));
    }

    let changed = for_each_node(host, &targets, "apply_image_fill", |h, id| {
        let node = resolve(h, id)?;
        let url = image_url(kind, node.width, node.height, stable_seed(id, 1000), min_size);
        let fills = node.fills.clone().unwrap_or_default();
        debug!(node = %id, %url, "fetching image");

        let bytes = source.fetch_bytes(&url)?;
        let hash = h.create_image(&bytes)?;
        h.set_fills(id, with_image(&fills, &hash))?;
        Ok::<_, AssistError>(true)
    });

    if changed == 0 {
        return Err(AssistError::zero("이미지를 적용하는데 실패했습니다."));
    }
    Ok(Outcome::new(
        changed,
        format!("{changed}개의 레이어에 이미지를 적용했습니다."),
    ))
}
