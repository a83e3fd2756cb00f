// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driftfield Scene: world-space layout of the canvas content.
//!
//! The canvas world holds three kinds of content: an intro block, a handful
//! of project cards at fixed organic positions, and the ASCII flow panel.
//! This crate owns that arithmetic so the interaction core
//! (`driftfield_viewport`, `driftfield_flow`) only ever sees coordinates.
//!
//! Cards follow a commit-then-refine sizing model. Every card is committed
//! at a fixed anchor with a uniform image height and a placeholder aspect
//! ratio; the intrinsic ratio of its thumbnail is discovered asynchronously
//! (the image loads long after layout) and fed back through
//! [`SceneLayout::set_aspect`]. Refinement resizes that card's rectangle in
//! place; anchors and the viewport transform are never re-laid-out.
//!
//! ```rust
//! use driftfield_scene::{CardId, SceneLayout};
//!
//! let mut scene = SceneLayout::new();
//! let id = scene.cards()[0].id();
//! let committed = scene.card_rect(id).unwrap();
//!
//! // The thumbnail finishes decoding: 4:3 after all.
//! scene.set_aspect(id, 4.0 / 3.0);
//! let refined = scene.card_rect(id).unwrap();
//! assert_eq!(refined.origin(), committed.origin());
//! assert_eq!(refined.height(), committed.height());
//! assert_ne!(refined.width(), committed.width());
//! ```

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};

/// Uniform rendered image height for all cards, in world pixels.
pub const IMAGE_HEIGHT: f64 = 260.0;

/// Aspect ratio assumed for a card until its intrinsic ratio arrives.
pub const PLACEHOLDER_ASPECT: f64 = 1.5;

/// World anchor of the intro block.
pub const INTRO_ANCHOR: Point = Point::new(100.0, 160.0);

/// Approximate extent of the intro block (greeting, name, buttons).
pub const INTRO_SIZE: Size = Size::new(620.0, 200.0);

/// Fixed organic anchors for the project cards: three descending case
/// studies below the intro, three smaller items trailing off to the right.
const CARD_ANCHORS: [(f64, f64); 6] = [
    (340.0, 480.0),
    (80.0, 980.0),
    (540.0, 1020.0),
    (820.0, 100.0),
    (1220.0, 60.0),
    (1180.0, 520.0),
];

/// Stable identifier of a project card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u32);

/// One project card: a stable id, a committed anchor, and an image aspect
/// ratio that may still be in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Card {
    id: CardId,
    anchor: Point,
    aspect: Option<f64>,
}

impl Card {
    /// The card's stable identifier.
    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    /// The card's committed world anchor (top-left corner).
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// The aspect ratio used for layout: the intrinsic one once known,
    /// otherwise the placeholder.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.aspect.unwrap_or(PLACEHOLDER_ASPECT)
    }

    /// Returns `true` once the intrinsic aspect ratio has arrived.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.aspect.is_some()
    }

    /// The card's world rectangle at the uniform image height.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.anchor, Size::new(IMAGE_HEIGHT * self.aspect(), IMAGE_HEIGHT))
    }
}

/// World placement of the ASCII flow panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowPanel {
    /// Top-left corner in world space.
    pub origin: Point,
    /// Grid width in cells.
    pub cols: usize,
    /// Grid height in cells.
    pub rows: usize,
    /// Cell size in world pixels (cells are square).
    pub cell_size: f64,
}

impl FlowPanel {
    /// The panel's pixel size.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(
            self.cols as f64 * self.cell_size,
            self.rows as f64 * self.cell_size,
        )
    }

    /// The panel's world rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size())
    }

    /// Maps a world-space point into panel-local pixels, or `None` when the
    /// point lies outside the panel.
    ///
    /// The local position is what `driftfield_flow` expects for stirring.
    #[must_use]
    pub fn to_local(&self, world: Point) -> Option<Point> {
        let local = world - self.origin.to_vec2();
        let size = self.size();
        (local.x >= 0.0 && local.y >= 0.0 && local.x < size.width && local.y < size.height)
            .then_some(local)
    }
}

impl Default for FlowPanel {
    fn default() -> Self {
        Self {
            origin: Point::new(-560.0, 160.0),
            cols: 40,
            rows: 25,
            cell_size: 12.0,
        }
    }
}

/// The committed world layout: intro block, cards, and flow panel.
#[derive(Clone, Debug)]
pub struct SceneLayout {
    cards: Vec<Card>,
    index: HashMap<CardId, usize>,
    flow_panel: FlowPanel,
}

impl SceneLayout {
    /// Creates the default layout with all six cards unmeasured.
    #[must_use]
    pub fn new() -> Self {
        let cards: Vec<Card> = CARD_ANCHORS
            .iter()
            .zip(0_u32..)
            .map(|(&(x, y), id)| Card {
                id: CardId(id),
                anchor: Point::new(x, y),
                aspect: None,
            })
            .collect();
        let index = cards
            .iter()
            .enumerate()
            .map(|(i, card)| (card.id, i))
            .collect();
        Self {
            cards,
            index,
            flow_panel: FlowPanel::default(),
        }
    }

    /// All cards, in display order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Looks up a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.index.get(&id).map(|&i| &self.cards[i])
    }

    /// The world rectangle of a card, if it exists.
    #[must_use]
    pub fn card_rect(&self, id: CardId) -> Option<Rect> {
        self.card(id).map(Card::rect)
    }

    /// Records a late-arriving intrinsic aspect ratio for a card.
    ///
    /// Only the card's own rectangle changes; every anchor and the viewport
    /// state stay as committed. Returns `false` for an unknown id.
    pub fn set_aspect(&mut self, id: CardId, aspect: f64) -> bool {
        match self.index.get(&id) {
            Some(&i) => {
                self.cards[i].aspect = Some(aspect);
                true
            }
            None => false,
        }
    }

    /// The flow panel placement.
    #[must_use]
    pub fn flow_panel(&self) -> &FlowPanel {
        &self.flow_panel
    }

    /// Replaces the flow panel placement.
    pub fn set_flow_panel(&mut self, panel: FlowPanel) {
        self.flow_panel = panel;
    }

    /// The intro block's world rectangle.
    #[must_use]
    pub fn intro_rect(&self) -> Rect {
        Rect::from_origin_size(INTRO_ANCHOR, INTRO_SIZE)
    }

    /// Union of everything placed in the world: intro, cards, flow panel.
    ///
    /// The canvas itself is unbounded; these bounds exist for consumers
    /// that want to fit or clamp a view around the content.
    #[must_use]
    pub fn world_bounds(&self) -> Rect {
        let mut bounds = self.intro_rect().union(self.flow_panel.rect());
        for card in &self.cards {
            bounds = bounds.union(card.rect());
        }
        bounds
    }
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self::new()
    }
}
