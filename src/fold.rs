use crate::error::TemplateError;
use crate::key::TemplateKey;
use crate::template::{Templates, Values, check_len};
use indexmap::IndexMap;

/// What a slot holds across every file of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot<'a> {
    /// Every file has this exact token here.
    Constant(&'a str),
    Variable,
}

/// Absorb slots whose value never changes within a template into its text.
///
/// `img_/a/_/b/.png` over `(1080, 001)`, `(1080, 002)`, ... becomes
/// `img_1080_/a/.png` over `(001)`, `(002)`, ... This is a single pass; the
/// result is not folded again. Templates whose folded text coincides are merged
/// in map order.
pub fn fold_constants(templates: Templates) -> Result<Templates, TemplateError> {
    let groups = templates.into_groups();
    let mut folded: IndexMap<TemplateKey, Vec<Values>> = IndexMap::with_capacity(groups.len());
    for (key, values) in groups {
        let (key, values) = fold_group(key, values)?;
        folded.entry(key).or_default().extend(values);
    }
    Ok(Templates::from_map(folded))
}

fn fold_vector<'a>(
    key: &TemplateKey,
    values: &'a [Values],
) -> Result<Vec<Slot<'a>>, TemplateError> {
    for v in values {
        check_len(key, v)?;
    }
    let Some(reference) = values.first() else {
        return Ok(Vec::new());
    };
    Ok((0..key.slots())
        .map(|i| {
            if values.iter().all(|v| v[i] == reference[i]) {
                Slot::Constant(&reference[i])
            } else {
                Slot::Variable
            }
        })
        .collect())
}

fn fold_group(
    key: TemplateKey,
    values: Vec<Values>,
) -> Result<(TemplateKey, Vec<Values>), TemplateError> {
    let slots = fold_vector(&key, &values)?;
    if !slots.iter().any(|s| matches!(s, Slot::Constant(_))) {
        return Ok((key, values));
    }

    let segments = key.segments();
    let mut merged = Vec::new();
    let mut current = segments[0].clone();
    for (slot, next) in slots.iter().zip(&segments[1..]) {
        match slot {
            Slot::Constant(token) => current.push_str(token),
            Slot::Variable => merged.push(std::mem::take(&mut current)),
        }
        current.push_str(next);
    }
    merged.push(current);

    let keep: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == Slot::Variable)
        .map(|(i, _)| i)
        .collect();
    let folded_key = TemplateKey::new(merged);
    if folded_key == key {
        return Ok((key, values));
    }

    tracing::debug!(from = %key, to = %folded_key, "folded constant slots");
    let folded_values = values
        .iter()
        .map(|v| keep.iter().map(|&i| v[i].clone()).collect())
        .collect();
    Ok((folded_key, folded_values))
}
