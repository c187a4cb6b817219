//! Scroll-driven navigation rail.
//!
//! A [`ScrollNavigator`] watches a scrolling panel, picks the section whose
//! anchor has most recently passed the top of the viewport, and turns the
//! scroll offset into a `0..=1` progress value for the rail marker.

use thiserror::Error;

/// Pixels added to the scroll offset before picking the active section, so a
/// section lights up slightly before its anchor reaches the very top.
pub const LOOKAHEAD: f64 = 120.0;

/// Gap left above an anchor after [`ScrollNavigator::navigate_to`].
pub const NAVIGATE_MARGIN: f64 = 32.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Planet {
    Sun,
    Earth,
    Saturn,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavTarget {
    pub id: &'static str,
    pub label: &'static str,
    /// Pixel offset of the waypoint along the rail.
    pub track_offset: f64,
    pub planet: Planet,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    pub active_id: &'static str,
    pub progress: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum TrackError {
    #[error("navigation track has no targets")]
    Empty,

    #[error("track offset of '{id}' ({offset}) does not increase on the previous waypoint")]
    NonIncreasingOffset { id: &'static str, offset: f64 },

    #[error("navigation target id '{id}' appears more than once")]
    DuplicateId { id: &'static str },
}

/// The live scroll container the navigator reads from and drives.
pub trait ScrollSurface {
    fn scroll_top(&self) -> f64;

    /// Top offset of the anchor for section `id`, or `None` when it is not
    /// laid out yet.
    fn anchor_top(&self, id: &str) -> Option<f64>;

    fn smooth_scroll_to(&self, top: f64);
}

pub struct ScrollNavigator {
    targets: Vec<NavTarget>,
    state: ScrollState,
    anchors: Option<Vec<f64>>,
}

impl ScrollNavigator {
    pub fn new(targets: Vec<NavTarget>) -> Result<Self, TrackError> {
        let first = targets.first().ok_or(TrackError::Empty)?;

        for (index, target) in targets.iter().enumerate().skip(1) {
            if target.track_offset <= targets[index - 1].track_offset {
                return Err(TrackError::NonIncreasingOffset {
                    id: target.id,
                    offset: target.track_offset,
                });
            }
            if targets[..index].iter().any(|earlier| earlier.id == target.id) {
                return Err(TrackError::DuplicateId { id: target.id });
            }
        }

        let state = ScrollState {
            active_id: first.id,
            progress: 0.0,
        };

        Ok(Self {
            targets,
            state,
            anchors: None,
        })
    }

    pub fn targets(&self) -> &[NavTarget] {
        &self.targets
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Distance travelled by the rail marker, in the same units as the
    /// waypoint track offsets.
    pub fn marker_offset(&self) -> f64 {
        let first = self.targets.first().map_or(0.0, |t| t.track_offset);
        let last = self.targets.last().map_or(0.0, |t| t.track_offset);
        first + self.state.progress * (last - first)
    }

    /// Forget measured anchor positions. The next scroll re-measures them.
    pub fn invalidate_geometry(&mut self) {
        self.anchors = None;
    }

    pub fn on_scroll(&mut self, surface: &impl ScrollSurface) -> ScrollState {
        let scroll_top = surface.scroll_top();
        let anchors = self.measure(surface);
        let effective_top = scroll_top + LOOKAHEAD;

        let mut active_id = self.targets[0].id;
        for (target, anchor) in self.targets.iter().zip(&anchors) {
            if anchor.is_some_and(|top| top <= effective_top) {
                active_id = target.id;
            }
        }

        let first = anchors.first().copied().flatten();
        let last = anchors.last().copied().flatten();
        let progress = match (first, last) {
            (Some(first), Some(last)) if last - first > 0.0 => {
                ((scroll_top - first) / (last - first)).clamp(0.0, 1.0)
            }
            _ => self.state.progress,
        };

        self.state = ScrollState {
            active_id,
            progress,
        };
        self.state
    }

    /// Scroll the surface so section `id` sits just below the top edge.
    /// Returns `false` and does nothing for an unknown or unmeasured id.
    pub fn navigate_to(&self, id: &str, surface: &impl ScrollSurface) -> bool {
        if !self.targets.iter().any(|target| target.id == id) {
            return false;
        }

        let Some(anchor_top) = surface.anchor_top(id) else {
            return false;
        };

        surface.smooth_scroll_to(anchor_top - NAVIGATE_MARGIN);
        true
    }

    fn measure(&mut self, surface: &impl ScrollSurface) -> Vec<Option<f64>> {
        if let Some(cached) = self.anchors.as_ref() {
            return cached.iter().copied().map(Some).collect();
        }

        let measured: Vec<Option<f64>> = self
            .targets
            .iter()
            .map(|target| surface.anchor_top(target.id))
            .collect();

        if measured.iter().all(Option::is_some) {
            self.anchors = Some(measured.iter().copied().flatten().collect());
        }

        measured
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    struct FakeSurface {
        scroll_top: Cell<f64>,
        anchors: RefCell<HashMap<&'static str, f64>>,
        scrolled_to: RefCell<Vec<f64>>,
    }

    impl FakeSurface {
        fn with_anchors(anchors: &[(&'static str, f64)]) -> Self {
            Self {
                scroll_top: Cell::new(0.0),
                anchors: RefCell::new(anchors.iter().copied().collect()),
                scrolled_to: RefCell::new(Vec::new()),
            }
        }
    }

    impl ScrollSurface for FakeSurface {
        fn scroll_top(&self) -> f64 {
            self.scroll_top.get()
        }

        fn anchor_top(&self, id: &str) -> Option<f64> {
            self.anchors.borrow().get(id).copied()
        }

        fn smooth_scroll_to(&self, top: f64) {
            self.scrolled_to.borrow_mut().push(top);
        }
    }

    fn track() -> Vec<NavTarget> {
        vec![
            NavTarget {
                id: "demos",
                label: "Demos",
                track_offset: 0.0,
                planet: Planet::Sun,
            },
            NavTarget {
                id: "highlights",
                label: "Highlights",
                track_offset: 80.0,
                planet: Planet::Earth,
            },
            NavTarget {
                id: "publications",
                label: "Papers",
                track_offset: 280.0,
                planet: Planet::Saturn,
            },
        ]
    }

    fn standard_surface() -> FakeSurface {
        FakeSurface::with_anchors(&[("demos", 0.0), ("highlights", 500.0), ("publications", 1800.0)])
    }

    fn scroll(nav: &mut ScrollNavigator, surface: &FakeSurface, top: f64) -> ScrollState {
        surface.scroll_top.set(top);
        nav.on_scroll(surface)
    }

    #[test]
    fn rejects_non_increasing_offsets() {
        let mut targets = track();
        targets[2].track_offset = 80.0;

        let error = ScrollNavigator::new(targets).err();
        assert_eq!(
            error,
            Some(TrackError::NonIncreasingOffset {
                id: "publications",
                offset: 80.0
            })
        );
    }

    #[test]
    fn rejects_empty_track() {
        assert_eq!(ScrollNavigator::new(Vec::new()).err(), Some(TrackError::Empty));
    }

    #[test]
    fn initial_state_points_at_first_target() {
        let nav = ScrollNavigator::new(track()).unwrap();
        assert_eq!(nav.state().active_id, "demos");
        assert_eq!(nav.state().progress, 0.0);
    }

    #[test]
    fn active_section_switches_at_lookahead_threshold() {
        let mut nav = ScrollNavigator::new(track()).unwrap();
        let surface = standard_surface();

        assert_eq!(scroll(&mut nav, &surface, 500.0 - LOOKAHEAD - 1.0).active_id, "demos");
        assert_eq!(scroll(&mut nav, &surface, 500.0 - LOOKAHEAD).active_id, "highlights");
        assert_eq!(scroll(&mut nav, &surface, 500.0).active_id, "highlights");
        assert_eq!(scroll(&mut nav, &surface, 1800.0).active_id, "publications");
    }

    #[test]
    fn progress_hits_exact_endpoints() {
        let mut nav = ScrollNavigator::new(track()).unwrap();
        let surface = standard_surface();

        assert_eq!(scroll(&mut nav, &surface, 0.0).progress, 0.0);
        assert_eq!(scroll(&mut nav, &surface, 1800.0).progress, 1.0);
    }

    #[test]
    fn progress_is_monotonic_and_bounded() {
        let mut nav = ScrollNavigator::new(track()).unwrap();
        let surface = standard_surface();

        let mut previous = 0.0;
        for step in 0..=180 {
            let progress = scroll(&mut nav, &surface, f64::from(step) * 10.0).progress;
            assert!((0.0..=1.0).contains(&progress));
            assert!(progress >= previous);
            previous = progress;
        }
    }

    #[test]
    fn overshoot_is_clamped() {
        let mut nav = ScrollNavigator::new(track()).unwrap();
        let surface = standard_surface();

        assert_eq!(scroll(&mut nav, &surface, -75.0).progress, 0.0);
        assert_eq!(scroll(&mut nav, &surface, 2400.0).progress, 1.0);
    }

    #[test]
    fn degenerate_geometry_keeps_previous_progress() {
        let mut nav = ScrollNavigator::new(track()).unwrap();
        let surface = standard_surface();
        scroll(&mut nav, &surface, 900.0);
        let before = nav.state().progress;

        let flat = FakeSurface::with_anchors(&[("demos", 0.0), ("highlights", 0.0), ("publications", 0.0)]);
        nav.invalidate_geometry();
        let state = scroll(&mut nav, &flat, 300.0);

        assert_eq!(state.progress, before);
        assert!(!state.progress.is_nan());
    }

    #[test]
    fn missing_anchor_is_skipped_and_not_cached() {
        let mut nav = ScrollNavigator::new(track()).unwrap();
        let surface = FakeSurface::with_anchors(&[("demos", 0.0), ("highlights", 500.0)]);

        let state = scroll(&mut nav, &surface, 1000.0);
        assert_eq!(state.active_id, "highlights");
        assert_eq!(state.progress, 0.0);

        surface.anchors.borrow_mut().insert("publications", 1800.0);
        let state = scroll(&mut nav, &surface, 1800.0);
        assert_eq!(state.active_id, "publications");
        assert_eq!(state.progress, 1.0);
    }

    #[test]
    fn cached_geometry_survives_until_invalidated() {
        let mut nav = ScrollNavigator::new(track()).unwrap();
        let surface = standard_surface();
        scroll(&mut nav, &surface, 0.0);

        surface.anchors.borrow_mut().insert("publications", 3600.0);
        assert_eq!(scroll(&mut nav, &surface, 1800.0).progress, 1.0);

        nav.invalidate_geometry();
        assert_eq!(scroll(&mut nav, &surface, 1800.0).progress, 0.5);
    }

    #[test]
    fn navigate_to_scrolls_above_anchor() {
        let nav = ScrollNavigator::new(track()).unwrap();
        let surface = standard_surface();

        assert!(nav.navigate_to("highlights", &surface));
        assert_eq!(*surface.scrolled_to.borrow(), vec![500.0 - NAVIGATE_MARGIN]);
    }

    #[test]
    fn navigate_to_unknown_id_is_a_no_op() {
        let mut nav = ScrollNavigator::new(track()).unwrap();
        let surface = standard_surface();
        let before = scroll(&mut nav, &surface, 700.0);

        assert!(!nav.navigate_to("unknown-id", &surface));
        assert!(surface.scrolled_to.borrow().is_empty());
        assert_eq!(nav.state(), before);
    }

    #[test]
    fn marker_follows_progress_along_track() {
        let mut nav = ScrollNavigator::new(track()).unwrap();
        let surface = standard_surface();

        scroll(&mut nav, &surface, 900.0);
        assert_eq!(nav.marker_offset(), 140.0);
    }
}
