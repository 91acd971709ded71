//! Quality ladder tables and ladder assembly.
//!
//! Provides the fixed resolution/bitrate table for every quality label the
//! player understands, the height-to-label mapping used for original
//! uploads, and [`build_ladder`], which orders the playable renditions of a
//! recording from highest to lowest quality.

use std::cmp::Reverse;

use serde::Serialize;

/* --------------------------------------------------------------------------
Named constants
-------------------------------------------------------------------------- */

pub const QUALITY_240P: &str = "240p";
pub const QUALITY_360P: &str = "360p";
pub const QUALITY_480P: &str = "480p";
pub const QUALITY_720P: &str = "720p";
pub const QUALITY_1080P: &str = "1080p";
pub const QUALITY_1440P: &str = "1440p";
pub const QUALITY_2160P: &str = "2160p";

/// Width used for labels missing from the table.
pub const UNKNOWN_QUALITY_WIDTH: i32 = 640;

/// Height used for labels missing from the table.
pub const UNKNOWN_QUALITY_HEIGHT: i32 = 360;

/// Bitrate estimate (bps) used for labels missing from the table.
pub const UNKNOWN_QUALITY_BITRATE: i64 = 800_000;

/// One row of the quality table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityProfile {
    pub label: &'static str,
    pub width: i32,
    pub height: i32,
    /// Estimated bitrate in bits per second.
    pub bitrate: i64,
    /// Position in the ladder, 1 for the lowest quality.
    pub order: u8,
}

/// The full ladder, lowest quality first.
pub const QUALITY_PROFILES: &[QualityProfile] = &[
    QualityProfile {
        label: QUALITY_240P,
        width: 426,
        height: 240,
        bitrate: 400_000,
        order: 1,
    },
    QualityProfile {
        label: QUALITY_360P,
        width: 640,
        height: 360,
        bitrate: 800_000,
        order: 2,
    },
    QualityProfile {
        label: QUALITY_480P,
        width: 854,
        height: 480,
        bitrate: 1_200_000,
        order: 3,
    },
    QualityProfile {
        label: QUALITY_720P,
        width: 1280,
        height: 720,
        bitrate: 2_500_000,
        order: 4,
    },
    QualityProfile {
        label: QUALITY_1080P,
        width: 1920,
        height: 1080,
        bitrate: 5_000_000,
        order: 5,
    },
    QualityProfile {
        label: QUALITY_1440P,
        width: 2560,
        height: 1440,
        bitrate: 8_000_000,
        order: 6,
    },
    QualityProfile {
        label: QUALITY_2160P,
        width: 3840,
        height: 2160,
        bitrate: 16_000_000,
        order: 7,
    },
];

/* --------------------------------------------------------------------------
Table lookups
-------------------------------------------------------------------------- */

/// Look up the table row for a quality label.
pub fn profile_for_label(label: &str) -> Option<&'static QualityProfile> {
    QUALITY_PROFILES.iter().find(|p| p.label == label)
}

/// Pixel dimensions for a label, `640x360` when the label is unknown.
pub fn dimensions_for_label(label: &str) -> (i32, i32) {
    profile_for_label(label)
        .map(|p| (p.width, p.height))
        .unwrap_or((UNKNOWN_QUALITY_WIDTH, UNKNOWN_QUALITY_HEIGHT))
}

/// Estimated bitrate for a label, `800_000` when the label is unknown.
pub fn bitrate_for_label(label: &str) -> i64 {
    profile_for_label(label)
        .map(|p| p.bitrate)
        .unwrap_or(UNKNOWN_QUALITY_BITRATE)
}

/// Ladder position for a label. Unknown labels sort below `240p`.
pub fn quality_order(label: &str) -> u8 {
    profile_for_label(label).map(|p| p.order).unwrap_or(0)
}

/// Derive the quality label of an original upload from its stored height.
pub fn quality_for_height(height: i32) -> &'static str {
    QUALITY_PROFILES
        .iter()
        .rev()
        .find(|p| height >= p.height)
        .map(|p| p.label)
        .unwrap_or(QUALITY_240P)
}

/* --------------------------------------------------------------------------
Ladder assembly
-------------------------------------------------------------------------- */

/// A playable rendition offered to the video player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityVariant {
    pub quality: String,
    pub width: i32,
    pub height: i32,
    pub bitrate: i64,
    pub file_size: i64,
    pub url: String,
    pub mime_type: String,
    pub is_original: bool,
}

/// The stored original upload of a recording.
#[derive(Debug, Clone)]
pub struct OriginalRendition {
    pub width: i32,
    pub height: i32,
    pub file_size: i64,
    /// Measured bitrate, if the upload pipeline stored one.
    pub bitrate: Option<i64>,
    pub mime_type: String,
    pub url: String,
}

/// A completed compression whose output file is known to exist.
#[derive(Debug, Clone)]
pub struct CompressedRendition {
    pub quality: String,
    /// Current on-disk size of the output file.
    pub file_size: i64,
    pub mime_type: String,
    pub url: String,
}

/// The ordered renditions of one recording.
#[derive(Debug, Clone, Serialize)]
pub struct QualityLadder {
    pub qualities: Vec<QualityVariant>,
    pub default_quality: String,
    pub auto_quality_available: bool,
}

/// Assemble the ladder for a recording.
///
/// `compressed` is expected newest first. Variants are ordered by
/// descending ladder position; the sort is stable, so equal positions keep
/// the compressed entries ahead of the original.
pub fn build_ladder(
    original: OriginalRendition,
    compressed: Vec<CompressedRendition>,
) -> QualityLadder {
    let default_quality = quality_for_height(original.height);

    let mut qualities: Vec<QualityVariant> = compressed
        .into_iter()
        .map(|c| {
            let (width, height) = dimensions_for_label(&c.quality);
            QualityVariant {
                bitrate: bitrate_for_label(&c.quality),
                quality: c.quality,
                width,
                height,
                file_size: c.file_size,
                url: c.url,
                mime_type: c.mime_type,
                is_original: false,
            }
        })
        .collect();

    qualities.push(QualityVariant {
        quality: default_quality.to_string(),
        width: original.width,
        height: original.height,
        bitrate: original
            .bitrate
            .unwrap_or_else(|| bitrate_for_label(default_quality)),
        file_size: original.file_size,
        url: original.url,
        mime_type: original.mime_type,
        is_original: true,
    });

    qualities.sort_by_key(|v| Reverse(quality_order(&v.quality)));

    QualityLadder {
        auto_quality_available: qualities.len() > 1,
        default_quality: default_quality.to_string(),
        qualities,
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
