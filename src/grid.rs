//! Hover-resizing media grid.
//!
//! Tiles are placed on an implicit grid whose cells are [`CELL`] units wide.
//! Hovering a cell grows its row and column to `hover_size` and shares what
//! is left of each axis evenly between the other tracks.

use std::fmt::Write as _;
use std::rc::Rc;

use thiserror::Error;

/// Grid units per cell. Tile positions are multiples of this.
pub const CELL: u32 = 4;

pub const DEFAULT_HOVER_SIZE: f64 = 6.0;
pub const DEFAULT_GAP_PX: u32 = 4;

/// Track resize transition, in seconds.
pub const TRACK_TRANSITION_SECS: f64 = 0.4;

/// Caption slide-in transition, in seconds.
pub const CAPTION_TRANSITION_SECS: f64 = 0.25;

#[derive(Clone, Debug, PartialEq)]
pub struct FrameDecor {
    pub corner: &'static str,
    pub edge_horizontal: &'static str,
    pub edge_vertical: &'static str,
    pub border_thickness: f64,
    /// Share of the tile covered by the framed media, in percent.
    pub border_size: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MediaTile {
    pub id: u32,
    pub media_ref: &'static str,
    pub caption: Option<&'static str>,
    pub link_url: Option<&'static str>,
    pub grid_x: u32,
    pub grid_y: u32,
    pub span_w: u32,
    pub span_h: u32,
    pub media_scale: f64,
    pub decor: Option<FrameDecor>,
}

impl MediaTile {
    pub fn cell(&self) -> GridCell {
        GridCell {
            row: self.grid_y / CELL,
            col: self.grid_x / CELL,
        }
    }

    /// CSS `transform-origin` anchoring the tile toward the grid edge it
    /// sits on.
    pub fn transform_origin(&self) -> String {
        let vertical = match self.grid_y {
            0 => "top",
            CELL => "center",
            _ => "bottom",
        };
        let horizontal = match self.grid_x {
            0 => "left",
            CELL => "center",
            _ => "right",
        };
        format!("{vertical} {horizontal}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDimensions {
    pub rows: u32,
    pub cols: u32,
}

impl GridDimensions {
    fn from_tiles(tiles: &[MediaTile]) -> Self {
        let rows = tiles.iter().map(|tile| tile.cell().row).max().unwrap_or(0) + 1;
        let cols = tiles.iter().map(|tile| tile.cell().col).max().unwrap_or(0) + 1;
        Self { rows, cols }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackPolicy {
    Autoplay,
    OnHover,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub hover_size: f64,
    pub gap_px: u32,
    pub playback: PlaybackPolicy,
    pub show_frames: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            hover_size: DEFAULT_HOVER_SIZE,
            gap_px: DEFAULT_GAP_PX,
            playback: PlaybackPolicy::OnHover,
            show_frames: false,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("media grid needs at least one tile")]
    NoTiles,

    #[error("tile id {id} is used more than once")]
    DuplicateTile { id: u32 },

    #[error("hover size must be positive, got {hover_size}")]
    InvalidHoverSize { hover_size: f64 },
}

/// Proportional sizes for the tracks of one axis.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackWeights(pub Vec<f64>);

impl TrackWeights {
    fn uniform(count: u32) -> Self {
        Self(vec![f64::from(CELL); count as usize])
    }

    /// CSS `grid-template-*` value, e.g. `6fr 2fr`.
    pub fn template(&self) -> String {
        let mut template = String::new();
        for (index, weight) in self.0.iter().enumerate() {
            if index > 0 {
                template.push(' ');
            }
            let _ = write!(template, "{weight}fr");
        }
        template
    }
}

/// Immutable tile set plus its derived grid dimensions.
#[derive(Debug, PartialEq)]
pub struct GridLayout {
    tiles: Vec<MediaTile>,
    dimensions: GridDimensions,
    config: GridConfig,
}

impl GridLayout {
    pub fn new(tiles: Vec<MediaTile>, config: GridConfig) -> Result<Self, GridError> {
        if tiles.is_empty() {
            return Err(GridError::NoTiles);
        }

        for (index, tile) in tiles.iter().enumerate() {
            if tiles[..index].iter().any(|earlier| earlier.id == tile.id) {
                return Err(GridError::DuplicateTile { id: tile.id });
            }
        }

        if config.hover_size.is_nan() || config.hover_size <= 0.0 {
            return Err(GridError::InvalidHoverSize {
                hover_size: config.hover_size,
            });
        }

        let dimensions = GridDimensions::from_tiles(&tiles);
        Ok(Self {
            tiles,
            dimensions,
            config,
        })
    }

    pub fn tiles(&self) -> &[MediaTile] {
        &self.tiles
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn row_weights(&self, hovered: Option<GridCell>) -> TrackWeights {
        self.axis_weights(self.dimensions.rows, hovered.map(|cell| cell.row))
    }

    pub fn col_weights(&self, hovered: Option<GridCell>) -> TrackWeights {
        self.axis_weights(self.dimensions.cols, hovered.map(|cell| cell.col))
    }

    /// Inline style for the grid container in the given hover state.
    pub fn container_style(&self, hovered: Option<GridCell>) -> String {
        format!(
            "display: grid; grid-template-rows: {}; grid-template-columns: {}; gap: {}px; \
             transition: grid-template-rows {TRACK_TRANSITION_SECS}s ease-in-out, \
             grid-template-columns {TRACK_TRANSITION_SECS}s ease-in-out;",
            self.row_weights(hovered).template(),
            self.col_weights(hovered).template(),
            self.config.gap_px,
        )
    }

    fn axis_weights(&self, count: u32, hovered: Option<u32>) -> TrackWeights {
        let Some(hovered) = hovered else {
            return TrackWeights::uniform(count);
        };

        // A single track has nowhere to take space from.
        if count < 2 || hovered >= count {
            return TrackWeights::uniform(count);
        }

        let total = f64::from(CELL) * f64::from(count);
        let remaining = total - self.config.hover_size;
        if remaining <= 0.0 {
            return TrackWeights::uniform(count);
        }

        let others = remaining / f64::from(count - 1);
        TrackWeights(
            (0..count)
                .map(|track| if track == hovered { self.config.hover_size } else { others })
                .collect(),
        )
    }
}

pub enum HoverAction {
    Enter(GridCell),
    Leave(GridCell),
}

/// At most one hovered cell. Entering always wins; leaving only clears the
/// cell that is currently hovered, so a late leave from a neighbour cannot
/// wipe out the newer hover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverTracker {
    hovered: Option<GridCell>,
}

impl HoverTracker {
    pub fn hovered(&self) -> Option<GridCell> {
        self.hovered
    }

    pub fn is_hovered(&self, cell: GridCell) -> bool {
        self.hovered == Some(cell)
    }

    /// Returns `true` when the hovered cell changed.
    pub fn apply(&mut self, action: HoverAction) -> bool {
        let next = match action {
            HoverAction::Enter(cell) => Some(cell),
            HoverAction::Leave(cell) if self.hovered == Some(cell) => None,
            HoverAction::Leave(_) => self.hovered,
        };

        let changed = next != self.hovered;
        self.hovered = next;
        changed
    }
}

#[cfg(target_arch = "wasm32")]
impl yew::Reducible for HoverTracker {
    type Action = HoverAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = *self;
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackCommand {
    Play,
    Pause,
}

/// Tracks what a tile's media element was last asked to do and emits a
/// command only when the wanted state differs.
#[derive(Clone, Copy, Debug)]
pub struct TilePlayback {
    policy: PlaybackPolicy,
    playing: Option<bool>,
}

impl TilePlayback {
    pub fn new(policy: PlaybackPolicy) -> Self {
        Self {
            policy,
            playing: None,
        }
    }

    pub fn sync(&mut self, hovered: bool) -> Option<PlaybackCommand> {
        let want_playing = match self.policy {
            PlaybackPolicy::Autoplay => true,
            PlaybackPolicy::OnHover => hovered,
        };

        if self.playing == Some(want_playing) {
            return None;
        }

        self.playing = Some(want_playing);
        Some(if want_playing {
            PlaybackCommand::Play
        } else {
            PlaybackCommand::Pause
        })
    }
}

/// Keeps a shared layout cheap to pass through component props.
pub type SharedLayout = Rc<GridLayout>;

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(id: u32, grid_x: u32, grid_y: u32) -> MediaTile {
        MediaTile {
            id,
            media_ref: "/videos/demo.mp4",
            caption: Some("Demo"),
            link_url: None,
            grid_x,
            grid_y,
            span_w: CELL,
            span_h: CELL,
            media_scale: 1.0,
            decor: None,
        }
    }

    fn six_tiles() -> Vec<MediaTile> {
        vec![
            tile(1, 0, 0),
            tile(2, 4, 0),
            tile(3, 8, 0),
            tile(4, 0, 4),
            tile(5, 4, 4),
            tile(6, 8, 4),
        ]
    }

    fn layout(tiles: Vec<MediaTile>) -> GridLayout {
        GridLayout::new(tiles, GridConfig::default()).unwrap()
    }

    #[test]
    fn dimensions_cover_every_tile() {
        let grid = layout(six_tiles());
        assert_eq!(grid.dimensions(), GridDimensions { rows: 2, cols: 3 });
    }

    #[test]
    fn tile_maps_to_cell_by_integer_division() {
        assert_eq!(tile(1, 9, 5).cell(), GridCell { row: 1, col: 2 });
    }

    #[test]
    fn rejects_empty_and_duplicate_tiles() {
        assert_eq!(GridLayout::new(Vec::new(), GridConfig::default()).err(), Some(GridError::NoTiles));

        let duplicated = vec![tile(1, 0, 0), tile(1, 4, 0)];
        assert_eq!(
            GridLayout::new(duplicated, GridConfig::default()).err(),
            Some(GridError::DuplicateTile { id: 1 })
        );
    }

    #[test]
    fn rejects_non_positive_hover_size() {
        let config = GridConfig {
            hover_size: 0.0,
            ..GridConfig::default()
        };
        assert!(matches!(
            GridLayout::new(six_tiles(), config),
            Err(GridError::InvalidHoverSize { .. })
        ));
    }

    #[test]
    fn hovering_a_row_redistributes_remaining_weight() {
        let grid = layout(six_tiles());
        let hovered = Some(GridCell { row: 0, col: 1 });

        assert_eq!(grid.row_weights(hovered), TrackWeights(vec![6.0, 2.0]));
        assert_eq!(grid.col_weights(hovered), TrackWeights(vec![3.0, 6.0, 3.0]));
        assert_eq!(grid.row_weights(None), TrackWeights(vec![4.0, 4.0]));
        assert_eq!(grid.col_weights(None), TrackWeights(vec![4.0, 4.0, 4.0]));
    }

    #[test]
    fn weights_keep_axis_total() {
        let grid = layout(six_tiles());
        for col in 0..3 {
            let weights = grid.col_weights(Some(GridCell { row: 1, col }));
            assert_eq!(weights.0.iter().sum::<f64>(), 12.0);
        }
    }

    #[test]
    fn single_track_axis_stays_uniform() {
        let grid = layout(vec![tile(1, 0, 0), tile(2, 4, 0), tile(3, 8, 0)]);
        let hovered = Some(GridCell { row: 0, col: 2 });

        assert_eq!(grid.row_weights(hovered), TrackWeights(vec![4.0]));
        assert_eq!(grid.col_weights(hovered), TrackWeights(vec![3.0, 3.0, 6.0]));
    }

    #[test]
    fn oversized_hover_falls_back_to_uniform() {
        let config = GridConfig {
            hover_size: 8.0,
            ..GridConfig::default()
        };
        let grid = GridLayout::new(six_tiles(), config).unwrap();

        assert_eq!(grid.row_weights(Some(GridCell { row: 1, col: 0 })), TrackWeights(vec![4.0, 4.0]));
    }

    #[test]
    fn template_renders_fraction_units() {
        assert_eq!(TrackWeights(vec![6.0, 2.0]).template(), "6fr 2fr");
        assert_eq!(TrackWeights(vec![3.0, 6.0, 3.0]).template(), "3fr 6fr 3fr");
    }

    #[test]
    fn container_style_carries_templates_and_gap() {
        let config = GridConfig {
            gap_px: 3,
            ..GridConfig::default()
        };
        let grid = GridLayout::new(six_tiles(), config).unwrap();
        let style = grid.container_style(Some(GridCell { row: 1, col: 0 }));

        assert!(style.contains("grid-template-rows: 2fr 6fr;"));
        assert!(style.contains("grid-template-columns: 6fr 3fr 3fr;"));
        assert!(style.contains("gap: 3px;"));
    }

    #[test]
    fn last_enter_wins_without_leave() {
        let mut tracker = HoverTracker::default();
        tracker.apply(HoverAction::Enter(GridCell { row: 0, col: 1 }));
        tracker.apply(HoverAction::Enter(GridCell { row: 0, col: 2 }));

        assert_eq!(tracker.hovered(), Some(GridCell { row: 0, col: 2 }));
    }

    #[test]
    fn stale_leave_does_not_clear_newer_hover() {
        let mut tracker = HoverTracker::default();
        let first = GridCell { row: 0, col: 1 };
        let second = GridCell { row: 0, col: 2 };

        tracker.apply(HoverAction::Enter(first));
        tracker.apply(HoverAction::Enter(second));
        assert!(!tracker.apply(HoverAction::Leave(first)));
        assert!(tracker.is_hovered(second));

        assert!(tracker.apply(HoverAction::Leave(second)));
        assert_eq!(tracker.hovered(), None);
    }

    #[test]
    fn re_entering_hovered_cell_is_a_no_op() {
        let mut tracker = HoverTracker::default();
        let cell = GridCell { row: 1, col: 1 };

        assert!(tracker.apply(HoverAction::Enter(cell)));
        assert!(!tracker.apply(HoverAction::Enter(cell)));
    }

    #[test]
    fn hover_only_playback_follows_pointer() {
        let mut playback = TilePlayback::new(PlaybackPolicy::OnHover);

        assert_eq!(playback.sync(false), Some(PlaybackCommand::Pause));
        assert_eq!(playback.sync(true), Some(PlaybackCommand::Play));
        assert_eq!(playback.sync(false), Some(PlaybackCommand::Pause));
        assert_eq!(playback.sync(true), Some(PlaybackCommand::Play));
        assert_eq!(playback.sync(true), None);
    }

    #[test]
    fn autoplay_ignores_hover() {
        let mut playback = TilePlayback::new(PlaybackPolicy::Autoplay);

        assert_eq!(playback.sync(false), Some(PlaybackCommand::Play));
        assert_eq!(playback.sync(true), None);
        assert_eq!(playback.sync(false), None);
    }

    #[test]
    fn transform_origin_follows_grid_position() {
        assert_eq!(tile(1, 0, 0).transform_origin(), "top left");
        assert_eq!(tile(2, 4, 0).transform_origin(), "top center");
        assert_eq!(tile(6, 8, 4).transform_origin(), "center right");
        assert_eq!(tile(7, 0, 8).transform_origin(), "bottom left");
    }
}
