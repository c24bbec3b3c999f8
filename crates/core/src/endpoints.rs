//! Explicit end point duplication for open uniform cubic B-spline curves.
//!
//! A host open B-spline interpolates its first and last control vertices
//! implicitly. The flattened representation makes that explicit by storing
//! each end value three times, which grows every non-empty curve by four
//! entries. The inverse drops the two synthetic copies after the first
//! value and before the last one.

use curvelink_scene::VariableData;

use crate::error::{ConversionError, Result};

/// Entries added to each non-empty curve.
pub const END_PADDING: u32 = 4;

pub fn padded_counts(counts: &[u32]) -> Vec<u32> {
    counts
        .iter()
        .map(|&count| if count > 0 { count + END_PADDING } else { 0 })
        .collect()
}

/// Inverse of [`padded_counts`]. A non-empty curve must hold at least one
/// original vertex plus the padding.
pub fn reduced_counts(adjusted: &[u32]) -> Result<Vec<u32>> {
    adjusted
        .iter()
        .enumerate()
        .map(|(curve, &count)| match count {
            0 => Ok(0),
            c if c > END_PADDING => Ok(c - END_PADDING),
            _ => Err(ConversionError::TooFewVertices { curve, count }),
        })
        .collect()
}

fn check_partition(len: usize, counts: &[u32]) -> Result<()> {
    let expected: usize = counts.iter().map(|&count| count as usize).sum();
    if expected != len {
        return Err(ConversionError::VariableSizeMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Repeats the first and last value of every curve twice.
///
/// `counts` partitions `values` by curve. A single-vertex curve treats its
/// value as both ends, so it becomes five entries.
pub fn duplicate_ends<T: Clone>(values: &[T], counts: &[u32]) -> Result<Vec<T>> {
    check_partition(values.len(), counts)?;
    let mut out = Vec::with_capacity(values.len() + counts.len() * END_PADDING as usize);
    let mut offset = 0;
    for &count in counts {
        let count = count as usize;
        for (j, value) in values[offset..offset + count].iter().enumerate() {
            out.push(value.clone());
            if j == 0 {
                out.push(value.clone());
                out.push(value.clone());
            }
            if j == count - 1 {
                out.push(value.clone());
                out.push(value.clone());
            }
        }
        offset += count;
    }
    Ok(out)
}

/// Exact inverse of [`duplicate_ends`]; `adjusted` partitions the padded
/// values by curve.
pub fn remove_duplicate_ends<T: Clone>(values: &[T], adjusted: &[u32]) -> Result<Vec<T>> {
    check_partition(values.len(), adjusted)?;
    let padding = adjusted.len() * END_PADDING as usize;
    let mut out = Vec::with_capacity(values.len().saturating_sub(padding));
    let mut offset = 0;
    for (curve, &count) in adjusted.iter().enumerate() {
        let len = count as usize;
        if len == 0 {
            continue;
        }
        if count <= END_PADDING {
            return Err(ConversionError::TooFewVertices { curve, count });
        }
        let curve_values = &values[offset..offset + len];
        out.push(curve_values[0].clone());
        if len > 5 {
            out.extend_from_slice(&curve_values[3..len - 3]);
            out.push(curve_values[len - 1].clone());
        }
        offset += len;
    }
    Ok(out)
}

pub fn duplicate_variable_ends(data: &mut VariableData, counts: &[u32]) -> Result<()> {
    match data {
        VariableData::Float(values) => *values = duplicate_ends(values.as_slice(), counts)?,
        VariableData::Int(values) => *values = duplicate_ends(values.as_slice(), counts)?,
        VariableData::Vec2(values) => *values = duplicate_ends(values.as_slice(), counts)?,
        VariableData::Vec3(values) => *values = duplicate_ends(values.as_slice(), counts)?,
        VariableData::Vec4(values) => *values = duplicate_ends(values.as_slice(), counts)?,
    }
    Ok(())
}

pub fn remove_variable_ends(data: &mut VariableData, adjusted: &[u32]) -> Result<()> {
    match data {
        VariableData::Float(values) => {
            *values = remove_duplicate_ends(values.as_slice(), adjusted)?;
        }
        VariableData::Int(values) => {
            *values = remove_duplicate_ends(values.as_slice(), adjusted)?;
        }
        VariableData::Vec2(values) => {
            *values = remove_duplicate_ends(values.as_slice(), adjusted)?;
        }
        VariableData::Vec3(values) => {
            *values = remove_duplicate_ends(values.as_slice(), adjusted)?;
        }
        VariableData::Vec4(values) => {
            *values = remove_duplicate_ends(values.as_slice(), adjusted)?;
        }
    }
    Ok(())
}
