//! Box descriptor parser
//!
//! Level geometry is stored as plain text, one oriented box per line:
//!
//! ```text
//! x y z ax1x/ax1y/ax1z ax2x/ax2y/ax2z ax3x/ax3y/ax3z
//! ```
//!
//! The first three fields are the box center. Each axis field is a vector
//! whose length is the half-extent along it. Blank lines and lines starting
//! with `#` are ignored.

use thiserror::Error;

use crate::foundation::math::Vec3;
use crate::physics::collision::BoxCollider;

/// Why a single descriptor line was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DescriptorError {
    /// Wrong number of whitespace separated fields
    #[error("expected 6 fields, found {found}")]
    FieldCount {
        /// Number of fields on the line
        found: usize,
    },

    /// A numeric component failed to parse or was not finite
    #[error("field {field}: invalid number '{value}'")]
    InvalidNumber {
        /// 1-based field position
        field: usize,
        /// Offending text
        value: String,
    },

    /// An axis field did not hold exactly three components
    #[error("field {field}: expected 3 '/'-separated components, found {found}")]
    AxisComponents {
        /// 1-based field position
        field: usize,
        /// Number of components present
        found: usize,
    },
}

/// Parse one descriptor line.
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<BoxCollider>, DescriptorError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(DescriptorError::FieldCount { found: fields.len() });
    }

    let center = Vec3::new(
        parse_component(fields[0], 1)?,
        parse_component(fields[1], 2)?,
        parse_component(fields[2], 3)?,
    );
    let axes = [
        parse_axis(fields[3], 4)?,
        parse_axis(fields[4], 5)?,
        parse_axis(fields[5], 6)?,
    ];

    Ok(Some(BoxCollider::from_axes(center, axes)))
}

/// Parse an `x/y/z` axis vector
fn parse_axis(token: &str, field: usize) -> Result<Vec3, DescriptorError> {
    let components: Vec<&str> = token.split('/').collect();
    if components.len() != 3 {
        return Err(DescriptorError::AxisComponents {
            field,
            found: components.len(),
        });
    }

    Ok(Vec3::new(
        parse_component(components[0], field)?,
        parse_component(components[1], field)?,
        parse_component(components[2], field)?,
    ))
}

/// Parse a single finite f32
fn parse_component(token: &str, field: usize) -> Result<f32, DescriptorError> {
    token
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| DescriptorError::InvalidNumber {
            field,
            value: token.to_string(),
        })
}
