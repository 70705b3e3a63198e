// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption data structures and list operations.
//!
//! Captions are addressed by their position in the list. Every operation
//! takes the current list and returns a new one; indices must be recomputed
//! from the current list after a removal.

use crate::util::geometry::{REF_HEIGHT, REF_WIDTH};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A caption placed on a picture, positioned in reference space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub content: String,
    pub x: f32,
    pub y: f32,
}

impl Caption {
    pub fn new(content: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            content: content.into(),
            x,
            y,
        }
    }
}

/// Append a caption at a random reference-space position.
///
/// `label` receives the 1-based number of the new caption.
pub fn add(texts: &[Caption], label: impl FnOnce(usize) -> String) -> Vec<Caption> {
    add_with(texts, label, &mut rand::rng())
}

/// Same as [`add`], sampling the position from `rng`.
pub fn add_with<R: Rng>(
    texts: &[Caption],
    label: impl FnOnce(usize) -> String,
    rng: &mut R,
) -> Vec<Caption> {
    let x = rng.random_range(0..REF_WIDTH as u32) as f32;
    let y = rng.random_range(0..REF_HEIGHT as u32) as f32;

    let mut next = texts.to_vec();
    next.push(Caption::new(label(texts.len() + 1), x, y));
    next
}

/// Remove the caption at `index`. Out-of-range indices leave the list as is.
pub fn remove(texts: &[Caption], index: usize) -> Vec<Caption> {
    texts
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, text)| text.clone())
        .collect()
}

/// Replace the content of the caption at `index`, keeping its position.
pub fn edit_content(texts: &[Caption], index: usize, content: &str) -> Vec<Caption> {
    let mut next = texts.to_vec();
    if let Some(text) = next.get_mut(index) {
        text.content = content.to_string();
    }
    next
}

/// Move the caption at `index` to a new reference-space position.
pub fn reposition(texts: &[Caption], index: usize, x: f32, y: f32) -> Vec<Caption> {
    let mut next = texts.to_vec();
    if let Some(text) = next.get_mut(index) {
        text.x = x;
        text.y = y;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn label(n: usize) -> String {
        format!("New caption {n}")
    }

    fn sample() -> Vec<Caption> {
        vec![
            Caption::new("one", 10.0, 20.0),
            Caption::new("two", 30.0, 40.0),
            Caption::new("three", 50.0, 60.0),
        ]
    }

    #[test]
    fn test_add_three_from_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut texts = Vec::new();
        for _ in 0..3 {
            texts = add_with(&texts, label, &mut rng);
        }

        let contents: Vec<&str> = texts.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["New caption 1", "New caption 2", "New caption 3"]);

        for text in &texts {
            assert!(text.x >= 0.0 && text.x < REF_WIDTH);
            assert!(text.y >= 0.0 && text.y < REF_HEIGHT);
            assert_eq!(text.x.fract(), 0.0);
            assert_eq!(text.y.fract(), 0.0);
        }

        let positions: Vec<(f32, f32)> = texts.iter().map(|t| (t.x, t.y)).collect();
        assert!(positions[0] != positions[1] || positions[1] != positions[2]);
    }

    #[test]
    fn test_add_bounds_hold_over_many_samples() {
        let mut rng = StdRng::seed_from_u64(42);
        let base = sample();
        for _ in 0..500 {
            let next = add_with(&base, label, &mut rng);
            assert_eq!(next.len(), base.len() + 1);
            assert_eq!(&next[..base.len()], &base[..]);

            let added = next.last().unwrap();
            assert_eq!(added.content, "New caption 4");
            assert!((0.0..REF_WIDTH).contains(&added.x));
            assert!((0.0..REF_HEIGHT).contains(&added.y));
            assert_eq!(added.x.fract(), 0.0);
            assert_eq!(added.y.fract(), 0.0);
        }
    }

    #[test]
    fn test_add_uses_thread_rng() {
        let next = add(&[], label);
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].content, "New caption 1");
    }

    #[test]
    fn test_remove_preserves_order() {
        let texts = sample();
        let next = remove(&texts, 1);
        assert_eq!(
            next,
            vec![Caption::new("one", 10.0, 20.0), Caption::new("three", 50.0, 60.0)]
        );
        // Input is untouched.
        assert_eq!(texts, sample());
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        assert_eq!(remove(&sample(), 3), sample());
        assert_eq!(remove(&sample(), usize::MAX), sample());
        assert_eq!(remove(&[], 0), Vec::<Caption>::new());
    }

    #[test]
    fn test_edit_content_only_touches_target() {
        let texts = sample();
        for index in 0..texts.len() {
            let next = edit_content(&texts, index, "");
            assert_eq!(next.len(), texts.len());
            for (i, (before, after)) in texts.iter().zip(&next).enumerate() {
                if i == index {
                    assert_eq!(after.content, "");
                    assert_eq!((after.x, after.y), (before.x, before.y));
                } else {
                    assert_eq!(after, before);
                }
            }
        }
    }

    #[test]
    fn test_edit_content_out_of_range_is_noop() {
        assert_eq!(edit_content(&sample(), 9, "nope"), sample());
    }

    #[test]
    fn test_reposition_keeps_content() {
        let next = reposition(&sample(), 2, 700.5, 3.25);
        assert_eq!(next[2], Caption::new("three", 700.5, 3.25));
        assert_eq!(&next[..2], &sample()[..2]);
        assert_eq!(reposition(&sample(), 3, 1.0, 1.0), sample());
    }
}
