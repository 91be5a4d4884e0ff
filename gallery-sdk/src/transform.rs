// ABOUTME: Image transformations expressed as CDN URL options rather than re-encoded bytes
// ABOUTME: Parses kind-dependent positional parameters into a typed transformation and applies it

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{messages, optimize};
use crate::delivery::DeliveryUrlBuilder;
use crate::error::GalleryError;
use crate::types::ImageDescriptor;

/// How the CDN fits an image into the requested dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropMode {
    Scale,
    Fit,
    Limit,
    Mfit,
    Fill,
    Lfill,
    Pad,
    Lpad,
    Mpad,
    Crop,
    Thumb,
}

impl CropMode {
    pub const ALL: [CropMode; 11] = [
        CropMode::Scale,
        CropMode::Fit,
        CropMode::Limit,
        CropMode::Mfit,
        CropMode::Fill,
        CropMode::Lfill,
        CropMode::Pad,
        CropMode::Lpad,
        CropMode::Mpad,
        CropMode::Crop,
        CropMode::Thumb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropMode::Scale => "scale",
            CropMode::Fit => "fit",
            CropMode::Limit => "limit",
            CropMode::Mfit => "mfit",
            CropMode::Fill => "fill",
            CropMode::Lfill => "lfill",
            CropMode::Pad => "pad",
            CropMode::Lpad => "lpad",
            CropMode::Mpad => "mpad",
            CropMode::Crop => "crop",
            CropMode::Thumb => "thumb",
        }
    }
}

impl fmt::Display for CropMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropMode {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CropMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| GalleryError::invalid_argument(format!("Unknown crop mode: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Resize,
    Optimize,
    Crop,
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransformKind::Resize => "resize",
            TransformKind::Optimize => "optimize",
            TransformKind::Crop => "crop",
        };
        f.write_str(name)
    }
}

impl FromStr for TransformKind {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The frontend still sends the long names
        match s.trim() {
            "resize" | "resizeImages" => Ok(TransformKind::Resize),
            "optimize" | "optimizeImages" => Ok(TransformKind::Optimize),
            "crop" | "cropImages" => Ok(TransformKind::Crop),
            other => Err(GalleryError::invalid_argument(format!(
                "Unknown transformation kind: {other}"
            ))),
        }
    }
}

/// A transformation with the parameters its kind needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Transformation {
    Resize {
        width: u32,
        crop: CropMode,
    },
    Optimize {
        format: String,
    },
    Crop {
        height: u32,
        width: u32,
        crop: CropMode,
    },
}

impl Transformation {
    pub fn kind(&self) -> TransformKind {
        match self {
            Transformation::Resize { .. } => TransformKind::Resize,
            Transformation::Optimize { .. } => TransformKind::Optimize,
            Transformation::Crop { .. } => TransformKind::Crop,
        }
    }

    /// Builds a transformation from the positional slots that follow the image list:
    ///
    /// | kind     | slots                     |
    /// |----------|---------------------------|
    /// | resize   | width, crop-mode          |
    /// | optimize | format                    |
    /// | crop     | height, width, crop-mode  |
    pub fn from_positional<S: AsRef<str>>(
        kind: &str,
        params: &[S],
    ) -> Result<Self, GalleryError> {
        if params.is_empty() {
            return Err(GalleryError::invalid_argument(messages::MISSING_PROPERTIES));
        }

        match kind.parse::<TransformKind>()? {
            TransformKind::Resize => Ok(Transformation::Resize {
                width: parse_dimension(slot(params, 0, "width")?, "width")?,
                crop: slot(params, 1, "crop mode")?.parse()?,
            }),
            TransformKind::Optimize => Ok(Transformation::Optimize {
                format: parse_format(slot(params, 0, "format")?)?,
            }),
            TransformKind::Crop => Ok(Transformation::Crop {
                height: parse_dimension(slot(params, 0, "height")?, "height")?,
                width: parse_dimension(slot(params, 1, "width")?, "width")?,
                crop: slot(params, 2, "crop mode")?.parse()?,
            }),
        }
    }

    pub fn options(&self) -> TransformOptions {
        match self {
            Transformation::Resize { width, crop } => TransformOptions {
                width: Some(*width),
                crop: Some(*crop),
                ..Default::default()
            },
            Transformation::Optimize { format } => TransformOptions {
                format: Some(format.clone()),
                flags: Some(optimize::FLAGS.to_string()),
                quality: Some(optimize::QUALITY.to_string()),
                ..Default::default()
            },
            Transformation::Crop {
                height,
                width,
                crop,
            } => TransformOptions {
                height: Some(*height),
                width: Some(*width),
                crop: Some(*crop),
                ..Default::default()
            },
        }
    }
}

fn slot<'a, S: AsRef<str>>(
    params: &'a [S],
    index: usize,
    name: &str,
) -> Result<&'a str, GalleryError> {
    params
        .get(index)
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| GalleryError::invalid_argument(format!("Missing {name}")))
}

fn parse_dimension(value: &str, name: &str) -> Result<u32, GalleryError> {
    match value.parse::<u32>() {
        Ok(0) | Err(_) => Err(GalleryError::invalid_argument(format!(
            "Invalid {name}: {value} (expected a positive integer)"
        ))),
        Ok(n) => Ok(n),
    }
}

fn parse_format(value: &str) -> Result<String, GalleryError> {
    let format = value.trim_start_matches('.').to_lowercase();
    if format.is_empty() || !format.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(GalleryError::invalid_argument(format!(
            "Invalid format: {value}"
        )));
    }
    Ok(format)
}

/// Key/value directives encoded into the delivery URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub crop: Option<CropMode>,
    pub quality: Option<String>,
    pub flags: Option<String>,
    /// Delivered as the file extension, not as a URL directive
    pub format: Option<String>,
}

impl TransformOptions {
    /// Comma-joined `key_value` directives, e.g. `c_fill,w_200`. Keys are
    /// pushed in alphabetical order.
    pub fn transformation_string(&self) -> String {
        let mut directives = Vec::new();

        if let Some(crop) = self.crop {
            directives.push(format!("c_{crop}"));
        }
        if let Some(flags) = &self.flags {
            directives.push(format!("fl_{flags}"));
        }
        if let Some(height) = self.height {
            directives.push(format!("h_{height}"));
        }
        if let Some(quality) = &self.quality {
            directives.push(format!("q_{quality}"));
        }
        if let Some(width) = self.width {
            directives.push(format!("w_{width}"));
        }

        directives.join(",")
    }
}

/// Returns a copy of every image with `link` pointing at the transformed URL.
/// Either every image is transformed or the call fails.
pub fn transform_images(
    delivery: &DeliveryUrlBuilder,
    transformation: &Transformation,
    images: &[ImageDescriptor],
) -> Result<Vec<ImageDescriptor>, GalleryError> {
    let options = transformation.options();
    log::debug!(
        "Applying {} transformation ({}) to {} images",
        transformation.kind(),
        options.transformation_string(),
        images.len()
    );

    images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            if image.public_id.trim().is_empty() {
                return Err(GalleryError::internal(
                    "image transform failed",
                    format!("image #{index} ('{}') has no public id", image.name),
                ));
            }
            Ok(image.with_link(delivery.url(&image.public_id, &options)))
        })
        .collect()
}
