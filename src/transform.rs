//! Pan-to-transform mapping for slider pages.
//!
//! Everything in here is pure arithmetic: the functions produce a list of
//! page updates that a [`Surface`](crate::Surface) implementation applies.

/// Default minimum shrink applied to a page while it fades out.
pub const DEFAULT_SCALE_MODIFIER: f64 = 0.25;

/// The CSS-style transform of a single page.
///
/// A page carries exactly one transform at a time, so applying a scale drops
/// any translation and vice versa.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transform {
    /// Horizontal translation in pixels
    Translate(f64),
    /// Uniform scale around the page center
    Scale(f64),
}

impl Transform {
    /// Horizontal offset in pixels (0 for scaled pages).
    #[inline]
    pub fn offset(&self) -> f64 {
        match self {
            Transform::Translate(x) => *x,
            Transform::Scale(_) => 0.0,
        }
    }

    /// Scale factor (1 for translated pages).
    #[inline]
    pub fn scale(&self) -> f64 {
        match self {
            Transform::Translate(_) => 1.0,
            Transform::Scale(s) => *s,
        }
    }

    /// Get the transform as a CSS-compatible string.
    pub fn css(&self) -> String {
        match self {
            Transform::Translate(x) => format!("translate3d({x}px, 0, 0)"),
            Transform::Scale(s) => format!("scale({s})"),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::Translate(0.0)
    }
}

/// A style change for one page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageUpdate {
    /// Page index
    pub index: usize,
    /// Opacity in 0.0 - 1.0
    pub opacity: f64,
    /// Transform to apply
    pub transform: Transform,
}

/// Result of a transform computation.
#[derive(Clone, Debug, PartialEq)]
pub struct PageLayout {
    /// Target index after clamping
    pub target: usize,
    /// Updates in page order. Pages without an entry keep their current style.
    pub updates: Vec<PageUpdate>,
}

impl PageLayout {
    /// Get the update for a page, if the layout touches it.
    pub fn update_for(&self, index: usize) -> Option<&PageUpdate> {
        self.updates.iter().find(|u| u.index == index)
    }
}

/// Parameters shared by every transform computation for one slider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformParams {
    /// Number of pages
    pub page_count: usize,
    /// Container width in pixels
    pub container_size: f64,
    /// Minimum shrink factor for fading pages
    pub scale_modifier: f64,
}

impl TransformParams {
    /// Clamp an index into the page range.
    #[inline]
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.page_count.saturating_sub(1))
    }

    /// Horizontal position of page `index` relative to `target` at `percent` drag.
    #[inline]
    pub fn position(&self, index: usize, target: usize, percent: f64) -> f64 {
        let steps = index as f64 - target as f64;
        (self.container_size / 100.0) * (steps * 100.0 + percent)
    }
}

/// Compute page styles for showing `target` with a drag of `percent`.
///
/// `percent <= 0` reveals the pages from the right while the target fades out
/// (or, when animating, while the page before the target finishes fading).
/// `percent > 0` slides the pages back in and fades the previous page in.
///
/// ## Example
///
/// ```rust
/// use fade_slider::transform::{compute_layout, Transform, TransformParams};
///
/// let params = TransformParams { page_count: 3, container_size: 300.0, scale_modifier: 0.25 };
/// let layout = compute_layout(&params, 1, 0.0, true);
///
/// let active = layout.update_for(1).unwrap();
/// assert_eq!(active.opacity, 1.0);
/// assert_eq!(active.transform, Transform::Translate(0.0));
///
/// let previous = layout.update_for(0).unwrap();
/// assert_eq!(previous.opacity, 0.0);
/// assert_eq!(previous.transform, Transform::Scale(0.75));
/// ```
pub fn compute_layout(
    params: &TransformParams,
    target: usize,
    percent: f64,
    animate: bool,
) -> PageLayout {
    let target = params.clamp_index(target);
    let modifier = params.scale_modifier;
    // When animating the fade always runs to completion
    let progress = if animate { -100.0 } else { percent };

    let mut updates = Vec::with_capacity(params.page_count);
    for i in 0..params.page_count {
        let is_previous = i + 1 == target;

        if percent <= 0.0 {
            if i > target || (i == target && animate) {
                updates.push(translated(i, params.position(i, target, percent)));
            } else if (i == target && !animate) || (is_previous && animate) {
                updates.push(PageUpdate {
                    index: i,
                    opacity: clamp_opacity((100.0 + progress) / 100.0),
                    transform: Transform::Scale(((100.0 + modifier * progress) / 100.0).min(1.0)),
                });
            }
        } else if i >= target {
            updates.push(translated(i, params.position(i, target, percent)));
        } else if is_previous {
            updates.push(PageUpdate {
                index: i,
                opacity: clamp_opacity(progress / 100.0),
                transform: Transform::Scale(
                    ((100.0 * (1.0 - modifier) + modifier * progress) / 100.0).min(1.0),
                ),
            });
        }
    }

    PageLayout { target, updates }
}

/// Compute the full page state after a completed navigation to `target`.
///
/// Every page gets an entry: earlier pages fully faded and shrunk, the
/// target at rest, later pages lined up to the right.
pub fn settled_layout(params: &TransformParams, target: usize) -> PageLayout {
    let target = params.clamp_index(target);
    let updates = (0..params.page_count)
        .map(|i| {
            if i < target {
                PageUpdate {
                    index: i,
                    opacity: 0.0,
                    transform: Transform::Scale(1.0 - params.scale_modifier),
                }
            } else {
                translated(i, params.position(i, target, 0.0))
            }
        })
        .collect();

    PageLayout { target, updates }
}

/// Initial edge-to-edge offsets: page `i` at `container_size * i`.
pub fn initial_offsets(
    page_count: usize,
    container_size: f64,
) -> impl Iterator<Item = (usize, Transform)> {
    (0..page_count).map(move |i| (i, Transform::Translate(container_size * i as f64)))
}

#[inline]
fn translated(index: usize, pos: f64) -> PageUpdate {
    PageUpdate {
        index,
        opacity: 1.0,
        transform: Transform::Translate(pos),
    }
}

#[inline]
fn clamp_opacity(opacity: f64) -> f64 {
    opacity.clamp(0.0, 1.0)
}
