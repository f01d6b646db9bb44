use crate::units::Px;
use serde::{Deserialize, Serialize};

/// Workarounds for text backends that disagree on how truncation and
/// right-to-left geometry are reported.
///
/// Placement math stays the same whatever the backend; only the checks and
/// corrections below change. The [Default] enables everything, which is what
/// a backend of unknown vintage needs. A backend known to report geometry
/// faithfully can use [Quirks::none].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quirks {
    /// Hide elements at or past the ellipsis of an ellipsized line. Some
    /// backends report no ellipsis when an inline element is the first thing
    /// to be truncated.
    pub ellipsis_truncation: bool,
    /// Hide elements on lines at or beyond the maximum line count. Some
    /// backends don't flag trailing lines as ellipsized.
    pub max_lines_truncation: bool,
    /// Hide elements at or after the reported end of their line. Some backends
    /// report the line end as the first truncated character.
    pub line_end_truncation: bool,
    /// Position an element anchored on the last character of the text from
    /// line extents rather than per-character queries, which hang on some
    /// backends at that offset.
    pub final_offset_workaround: bool,
    /// Reflect right-to-left horizontal positions around the line's right
    /// edge. Some backends bias line-right and horizontal queries by the same
    /// amount in single-line right-to-left paragraphs; the reflection cancels
    /// that bias out.
    pub rtl_bias_correction: bool,
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks {
            ellipsis_truncation: true,
            max_lines_truncation: true,
            line_end_truncation: true,
            final_offset_workaround: true,
            rtl_bias_correction: true,
        }
    }
}

impl Quirks {
    /// No workarounds at all
    pub fn none() -> Quirks {
        Quirks {
            ellipsis_truncation: false,
            max_lines_truncation: false,
            line_end_truncation: false,
            final_offset_workaround: false,
            rtl_bias_correction: false,
        }
    }

    /// Apply the right-to-left bias correction to a horizontal position.
    /// Left-to-right paragraphs, or a disabled correction, get `x` back untouched.
    pub fn correct_rtl_bias(
        &self,
        x: Px,
        rtl_paragraph: bool,
        container_width: Px,
        line_right: Px,
    ) -> Px {
        if self.rtl_bias_correction && rtl_paragraph {
            container_width - (line_right - x)
        } else {
            x
        }
    }
}
