//! Interactive background boxes
//!
//! Renders the skewed grid from `core::background` and lights cells up on
//! hover. The tracker only runs in the browser; the server renders the
//! resting grid.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

use crate::core::background::{
    BackgroundConfig, CellId, CellVisual, ColorPicker, Grid, InteractionState,
    InteractionTracker, TimerDriver, project_cell,
};

type SharedTracker<D, P> = StoredValue<Rc<RefCell<InteractionTracker<D, P>>>, LocalStorage>;

/// Hero background component
#[component]
pub fn BackgroundBoxes(
    /// Visual options; defaults reproduce the landing page
    #[prop(optional)]
    config: Option<BackgroundConfig>,
    /// Extra classes for the outer container
    #[prop(optional, into)]
    class: String,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let parts = match config.build() {
        Ok(parts) => parts,
        Err(e) => {
            leptos::logging::warn!("Background disabled: {}", e);
            return view! { <div class=class></div> }.into_any();
        }
    };

    let state = RwSignal::new(InteractionState::default());

    #[cfg(not(feature = "ssr"))]
    let on_enter = browser::attach(&parts, state);
    #[cfg(feature = "ssr")]
    let on_enter = Callback::new(|_: CellId| {});

    let grid = parts.grid;
    let rows = (0..grid.row_count())
        .map(|row| {
            let cells = grid
                .row(row)
                .map(|cell| cell_view(&grid, cell, state, on_enter))
                .collect_view();
            view! { <div class="w-16 h-8 border-l border-slate-700 relative">{cells}</div> }
        })
        .collect_view();

    let container_class = format!("fixed inset-0 flex w-screen h-screen z-0 {}", class);
    let transform = format!("transform: {};", parts.transform.css());

    view! {
        <div class=container_class style=transform aria-hidden="true">
            {rows}
        </div>
    }
    .into_any()
}

/// Feed a hover into the tracker and publish the new snapshot.
///
/// Returns `false` once the owning component is gone.
#[cfg_attr(feature = "ssr", allow(dead_code))]
fn record_enter<D, P>(
    tracker: SharedTracker<D, P>,
    state: RwSignal<InteractionState>,
    cell: CellId,
) -> bool
where
    D: TimerDriver + 'static,
    P: ColorPicker + 'static,
{
    tracker
        .try_with_value(|t| {
            let mut t = t.borrow_mut();
            t.on_cell_enter(cell);
            state.try_set(t.snapshot());
        })
        .is_some()
}

/// Projection of one cell that only notifies when that cell's visual changes
fn cell_visual(
    grid: Grid,
    cell: CellId,
    state: RwSignal<InteractionState>,
) -> Memo<Option<CellVisual>> {
    Memo::new(move |_| state.with(|s| project_cell(&grid, s, cell)))
}

fn cell_view(
    grid: &Grid,
    cell: CellId,
    state: RwSignal<InteractionState>,
    on_enter: Callback<CellId>,
) -> AnyView {
    // Thinned cells keep their slot so the lattice stays aligned
    if !grid.is_rendered(cell) {
        return view! { <div class="w-16 h-8"></div> }.into_any();
    }

    let glyph = grid.has_glyph(cell).then(|| {
        view! {
            <svg
                xmlns="http://www.w3.org/2000/svg"
                fill="none"
                viewBox="0 0 24 24"
                stroke-width="1.5"
                stroke="currentColor"
                class="absolute h-6 w-10 -top-[14px] -left-[22px] text-slate-700 stroke-[1px] pointer-events-none"
            >
                <path stroke-linecap="round" stroke-linejoin="round" d="M12 6v12m6-6H6" />
            </svg>
        }
    });

    let visual = cell_visual(grid.clone(), cell, state);
    let style = move || {
        visual.with(|v| v.as_ref().map(CellVisual::style).unwrap_or_default())
    };

    view! {
        <div
            class="w-16 h-8 border-r border-t border-slate-700 relative"
            style=style
            on:mouseenter=move |_| on_enter.run(cell)
        >
            {glyph}
        </div>
    }
    .into_any()
}

#[cfg(not(feature = "ssr"))]
mod browser {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use std::time::Duration;

    use gloo_timers::callback::Timeout;
    use leptos::prelude::*;

    use crate::core::background::{
        BackgroundParts, CellId, Expiry, InteractionState, InteractionTracker, RandomPicker,
        TimerDriver, Timestamp,
    };

    type BrowserTracker = InteractionTracker<BrowserTimers, RandomPicker>;

    /// `setTimeout` timers on the `performance.now()` clock
    pub struct BrowserTimers {
        on_fire: Rc<dyn Fn(Expiry)>,
    }

    fn performance_now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    impl TimerDriver for BrowserTimers {
        type Handle = Timeout;

        fn now(&self) -> Timestamp {
            Timestamp::from_millis(performance_now().max(0.0) as u64)
        }

        fn schedule(&mut self, expiry: Expiry, delay: Duration) -> Timeout {
            let on_fire = Rc::clone(&self.on_fire);
            let ms = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
            Timeout::new(ms, move || on_fire(expiry))
        }

        fn cancel(&mut self, handle: Timeout) {
            handle.cancel();
        }
    }

    /// Start a tracker owned by the current reactive owner and return the
    /// hover handler.
    pub fn attach(parts: &BackgroundParts, state: RwSignal<InteractionState>) -> Callback<CellId> {
        let palette = parts.palette.clone();
        let settings = parts.settings;

        let tracker = Rc::new_cyclic(|weak: &Weak<RefCell<BrowserTracker>>| {
            let weak = weak.clone();
            let on_fire: Rc<dyn Fn(Expiry)> = Rc::new(move |expiry| {
                let weak = weak.clone();
                // Runs after the timer callback has returned
                wasm_bindgen_futures::spawn_local(async move {
                    let Some(tracker) = weak.upgrade() else {
                        return;
                    };
                    let mut tracker = tracker.borrow_mut();
                    if tracker.expire(expiry) {
                        state.try_set(tracker.snapshot());
                    }
                });
            });

            RefCell::new(InteractionTracker::new(
                palette,
                settings,
                BrowserTimers { on_fire },
                RandomPicker::from_entropy(),
            ))
        });

        leptos::logging::log!(
            "Background mounted with {} palette colors",
            parts.palette.len()
        );

        let tracker = StoredValue::new_local(tracker);

        on_cleanup(move || {
            tracker.try_with_value(|t| t.borrow_mut().clear_all());
        });

        Callback::new(move |cell: CellId| {
            super::record_enter(tracker, state, cell);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::core::background::{
        ActiveTreatment, Color, ManualTimers, Palette, SequencePicker, Timestamp, TrackerSettings,
    };

    fn active(row: u32, col: u32, color: &str) -> ActiveTreatment {
        ActiveTreatment {
            cell: CellId::new(row, col),
            color: Color::new(color),
            expires_at: Timestamp(800),
        }
    }

    #[test]
    fn test_cell_visual_tracks_only_its_cell() {
        let owner = Owner::new();
        owner.with(|| {
            let grid = Grid::new(4, 4).unwrap();
            let state = RwSignal::new(InteractionState::default());
            let target = CellId::new(0, 0);
            let visual = cell_visual(grid, target, state);

            let resting = visual.get_untracked();
            assert_eq!(resting.as_ref().map(|v| v.emphasis), Some(false));

            // Another cell lighting up leaves this projection unchanged
            state.set([active(2, 2, "red")].into_iter().collect());
            assert_eq!(visual.get_untracked(), resting);

            state.set([active(0, 0, "blue"), active(2, 2, "red")].into_iter().collect());
            let lit = visual.get_untracked().unwrap();
            assert!(lit.emphasis);
            assert_eq!(lit.background, Some(Color::new("blue")));
        });
    }

    #[test]
    fn test_thinned_cell_has_no_visual() {
        let owner = Owner::new();
        owner.with(|| {
            let grid = Grid::new(4, 4).unwrap();
            let state = RwSignal::new(InteractionState::default());
            let visual = cell_visual(grid, CellId::new(1, 1), state);

            assert_eq!(visual.get_untracked(), None);
        });
    }

    fn stored_tracker() -> SharedTracker<ManualTimers, SequencePicker> {
        StoredValue::new_local(Rc::new(RefCell::new(InteractionTracker::new(
            Palette::new(["red"]).unwrap(),
            TrackerSettings::new(Duration::from_millis(800)),
            ManualTimers::new(),
            SequencePicker::new(vec![0]),
        ))))
    }

    #[test]
    fn test_record_enter_publishes_snapshot() {
        let owner = Owner::new();
        owner.with(|| {
            let tracker = stored_tracker();
            let state = RwSignal::new(InteractionState::default());

            assert!(record_enter(tracker, state, CellId::new(0, 0)));

            let snapshot = state.get_untracked();
            assert_eq!(snapshot.len(), 1);
            assert_eq!(
                snapshot.get(&CellId::new(0, 0)).map(|t| t.color.clone()),
                Some(Color::new("red"))
            );
        });
    }

    #[test]
    fn test_record_enter_after_unmount_is_ignored() {
        let owner = Owner::new();
        let (tracker, state) = owner.with(|| {
            (stored_tracker(), RwSignal::new(InteractionState::default()))
        });
        owner.cleanup();

        // Late mouseenter on a torn-down grid
        assert!(!record_enter(tracker, state, CellId::new(0, 0)));
    }
}
