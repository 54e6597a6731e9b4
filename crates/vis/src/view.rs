//! The dashboard view state and its event reducer.
//!
//! Interactions are modeled as events folded over an immutable state value.
//! Applying an event never mutates the current state; it produces the next
//! one, so replaying the same event sequence always lands on the same state.

use covis_data::fips::FipsTable;

use crate::layout::chart::Category;
use crate::scale::Dimensions;

/// The state selected when the dashboard first loads.
pub const DEFAULT_STATE: &str = "NY";

const MAX_CHART_WIDTH: f64 = 1000.0;
const CHART_ASPECT_RATIO: f64 = 0.4;

/// Derives the chart viewport from the window width: capped at 1000px wide,
/// with a fixed 0.4 height ratio.
pub fn chart_dimensions(window_width: f64) -> Dimensions {
    let width = window_width.min(MAX_CHART_WIDTH);

    Dimensions {
        width,
        height: width * CHART_ASPECT_RATIO,
    }
}

/// A pointer position in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    /// Horizontal page coordinate in pixels.
    pub x: f64,
    /// Vertical page coordinate in pixels.
    pub y: f64,
}

/// What the pointer is over.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverTarget {
    /// A chart mark: the record at `index` in the filtered set, for one
    /// category.
    Record {
        /// Index into the state's filtered record set.
        index: usize,
        /// The hovered mark's category.
        category: Category,
    },
    /// A map region, identified by its boundary-feature FIPS code.
    Feature {
        /// The boundary-feature FIPS code.
        fips: String,
    },
}

/// An active hover and the pointer position it was observed at.
#[derive(Debug, Clone, PartialEq)]
pub struct Hover {
    /// What is hovered.
    pub target: HoverTarget,
    /// Where the pointer is.
    pub pointer: PointerPosition,
}

/// A dashboard interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A map region was clicked.
    MapClick {
        /// The clicked feature's FIPS code.
        feature_id: String,
    },
    /// A state was picked from the state list.
    SelectState {
        /// The picked state abbreviation.
        state: String,
    },
    /// The window was resized.
    Resize {
        /// The new window width in pixels.
        window_width: f64,
    },
    /// The pointer moved over a mark or region.
    Hover(Hover),
    /// The pointer left whatever it was over.
    Unhover,
}

/// The complete view state of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// The abbreviation of the state whose chart is shown.
    pub selected_state: String,
    /// The chart viewport derived from the window width.
    pub dimensions: Dimensions,
    /// The active hover, if any.
    pub hover: Option<Hover>,
}

impl ViewState {
    /// The initial view state for a window width: the default state
    /// selected, nothing hovered.
    pub fn new(window_width: f64) -> ViewState {
        Self {
            selected_state: String::from(DEFAULT_STATE),
            dimensions: chart_dimensions(window_width),
            hover: None,
        }
    }

    /// Folds one event into the next state.
    ///
    /// A map click selects the clicked region's state through the FIPS
    /// lookup table. When the table is unavailable or the code is not in
    /// it, the click changes nothing; the dashboard keeps working on the
    /// current selection.
    pub fn apply(&self, event: Event, fips_table: Option<&FipsTable>) -> ViewState {
        match event {
            Event::MapClick { feature_id } => {
                let state = fips_table.and_then(|table| table.abbreviation(&feature_id));

                match state {
                    Some(state) => ViewState {
                        selected_state: state.to_owned(),
                        hover: None,
                        ..self.clone()
                    },
                    None => self.clone(),
                }
            }
            Event::SelectState { state } => ViewState {
                selected_state: state,
                hover: None,
                ..self.clone()
            },
            Event::Resize { window_width } => ViewState {
                dimensions: chart_dimensions(window_width),
                // Hover coordinates are stale after a relayout.
                hover: None,
                ..self.clone()
            },
            Event::Hover(hover) => ViewState {
                hover: Some(hover),
                ..self.clone()
            },
            Event::Unhover => ViewState {
                hover: None,
                ..self.clone()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use covis_data::fips::FipsEntry;

    fn table() -> FipsTable {
        [
            (
                String::from("36"),
                FipsEntry {
                    abbreviation: String::from("NY"),
                    name: String::from("New York"),
                },
            ),
            (
                String::from("43"),
                FipsEntry {
                    abbreviation: String::from("PR"),
                    name: String::from("Puerto Rico"),
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn initial_state_selects_the_default() {
        let state = ViewState::new(1400.0);

        assert_eq!(state.selected_state, DEFAULT_STATE);
        assert_eq!(state.dimensions.width, 1000.0);
        assert_eq!(state.dimensions.height, 400.0);
        assert!(state.hover.is_none());
    }

    #[test]
    fn narrow_windows_shrink_the_chart() {
        let state = ViewState::new(500.0);

        assert_eq!(state.dimensions.width, 500.0);
        assert_eq!(state.dimensions.height, 200.0);
    }

    #[test]
    fn resize_recomputes_dimensions_and_keeps_the_selection() {
        let table = table();
        let state = ViewState::new(1400.0).apply(
            Event::SelectState {
                state: String::from("WA"),
            },
            Some(&table),
        );

        let resized = state.apply(
            Event::Resize {
                window_width: 500.0,
            },
            Some(&table),
        );

        assert_eq!(resized.selected_state, "WA");
        assert_eq!(resized.dimensions.width, 500.0);
        assert_eq!(resized.dimensions.height, 200.0);
    }

    #[test]
    fn map_clicks_select_through_the_fips_table() {
        let table = table();
        let state = ViewState::new(1400.0).apply(
            Event::MapClick {
                feature_id: String::from("72"),
            },
            Some(&table),
        );

        // Puerto Rico's geometry code remaps onto the table's key space.
        assert_eq!(state.selected_state, "PR");
    }

    #[test]
    fn clicks_on_unknown_regions_change_nothing() {
        let table = table();
        let initial = ViewState::new(1400.0);

        let state = initial.apply(
            Event::MapClick {
                feature_id: String::from("78"),
            },
            Some(&table),
        );

        assert_eq!(state, initial);
    }

    #[test]
    fn clicks_without_a_fips_table_change_nothing() {
        let initial = ViewState::new(1400.0);

        let state = initial.apply(
            Event::MapClick {
                feature_id: String::from("36"),
            },
            None,
        );

        assert_eq!(state, initial);
    }

    #[test]
    fn hover_then_unhover_round_trips() {
        let initial = ViewState::new(1400.0);
        let hover = Hover {
            target: HoverTarget::Record {
                index: 3,
                category: Category::Positive,
            },
            pointer: PointerPosition { x: 400.0, y: 300.0 },
        };

        let hovered = initial.apply(Event::Hover(hover.clone()), None);
        assert_eq!(hovered.hover, Some(hover));

        let cleared = hovered.apply(Event::Unhover, None);
        assert_eq!(cleared, initial);
    }

    #[test]
    fn selection_clears_the_hover() {
        let hovered = ViewState::new(1400.0).apply(
            Event::Hover(Hover {
                target: HoverTarget::Feature {
                    fips: String::from("36"),
                },
                pointer: PointerPosition { x: 10.0, y: 10.0 },
            }),
            None,
        );

        let state = hovered.apply(
            Event::SelectState {
                state: String::from("CA"),
            },
            None,
        );

        assert!(state.hover.is_none());
    }

    #[test]
    fn applying_an_event_leaves_the_previous_state_intact() {
        let initial = ViewState::new(1400.0);

        let _next = initial.apply(
            Event::SelectState {
                state: String::from("CA"),
            },
            None,
        );

        assert_eq!(initial.selected_state, DEFAULT_STATE);
    }
}
