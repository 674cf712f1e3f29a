//! Experience extraction
//!
//! The page renders "one role at one company" and "several roles at one
//! company" with the same list-item shape. A class token on the item is the
//! only thing that tells them apart, so it is read once into
//! `ExperienceShape` and every later decision branches on that value.

use super::error::{ExtractResult, ExtractionError};
use super::fields::{
    attribute, description, find, find_all, join, map_items, non_empty_text, required_text,
    start_end_dates, text,
};
use super::selectors::{
    COMPANY, COMPANY_IMAGE, DELAYED_URL_ATTR, GROUP_MARKER, GROUP_POSITIONS,
    GROUP_POSITION_LOCATION, ITEM_LOCATION, META_ITEMS, POSITION_TITLE,
};
use crate::document::DocumentNode;
use crate::profile::{Experience, Position};

/// How an experience item lays out its positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceShape {
    /// The item itself is the single position
    Flat,
    /// The item is a company umbrella over child position items
    Grouped,
}

impl ExperienceShape {
    /// Read the shape from the item's `class` attribute
    pub fn of<N: DocumentNode>(item: &N, path: &str) -> ExtractResult<Self> {
        let class = attribute(item, path, "class")?.unwrap_or_default();
        if class.split_whitespace().any(|token| token == GROUP_MARKER) {
            Ok(Self::Grouped)
        } else {
            Ok(Self::Flat)
        }
    }

    /// Selector for the explicit location node of a position in this shape
    fn location_selector(self) -> &'static str {
        match self {
            Self::Flat => ITEM_LOCATION,
            Self::Grouped => GROUP_POSITION_LOCATION,
        }
    }
}

pub(crate) fn extract_experience<N: DocumentNode>(item: &N, path: &str) -> ExtractResult<Experience> {
    let company = non_empty_text(item, path, COMPANY)?;
    let company_image = match find(item, path, COMPANY_IMAGE)? {
        Some(img) => attribute(&img, &join(path, COMPANY_IMAGE), DELAYED_URL_ATTR)?,
        None => None,
    };
    let positions = extract_positions(item, path)?;
    Ok(Experience {
        company,
        company_image,
        positions,
    })
}

/// Positions of one experience item, flattened regardless of shape
pub(crate) fn extract_positions<N: DocumentNode>(item: &N, path: &str) -> ExtractResult<Vec<Position>> {
    match ExperienceShape::of(item, path)? {
        ExperienceShape::Grouped => {
            let children = find_all(item, path, GROUP_POSITIONS)?;
            if children.is_empty() {
                return Err(ExtractionError::NoPositions {
                    path: join(path, GROUP_POSITIONS),
                });
            }
            map_items(&children, path, "position", |child, child_path| {
                extract_position(child, child_path, ExperienceShape::Grouped)
            })
        }
        ExperienceShape::Flat => Ok(vec![extract_position(
            item,
            &join(path, "position[0]"),
            ExperienceShape::Flat,
        )?]),
    }
}

fn extract_position<N: DocumentNode>(
    node: &N,
    path: &str,
    shape: ExperienceShape,
) -> ExtractResult<Position> {
    let title = required_text(node, path, POSITION_TITLE)?;
    let location = extract_location(node, path, shape)?;
    let (start_date, end_date) = start_end_dates(node, path)?;
    let description = description(node, path)?;
    Ok(Position {
        title,
        start_date,
        end_date,
        location,
        description,
    })
}

/// Explicit location node first, then the second metadata item.
fn extract_location<N: DocumentNode>(node: &N, path: &str, shape: ExperienceShape) -> ExtractResult<String> {
    let selector = shape.location_selector();
    if let Some(location) = find(node, path, selector)? {
        return text(&location, &join(path, selector));
    }
    let meta = find_all(node, path, META_ITEMS)?;
    match meta.get(1) {
        Some(item) => text(item, &format!("{}[1]", join(path, META_ITEMS))),
        None => Err(ExtractionError::MissingLocation {
            path: join(path, META_ITEMS),
            found: meta.len(),
        }),
    }
}
