use leptos::html::Div;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    application::{ChartComponent, ChartConfig, ChartPhase, UpdateOutcome},
    domain::{logging::LogComponent, market_data::ServerRecord},
    infrastructure::perspective::{PerspectiveTable, PerspectiveViewer, PerspectiveWorker},
    log_error, log_trace,
};

/// 🦀 Live ratio chart backed by a `<perspective-viewer>`.
///
/// Every new value of `data` is one batch of records to append.
#[component]
pub fn RatioGraph(
    #[prop(into)] data: Signal<Vec<ServerRecord>>,
    #[prop(optional)] config: ChartConfig,
) -> impl IntoView {
    let host = create_node_ref::<Div>();
    let viewer_tag = config.viewer_tag.clone();
    let chart: Rc<RefCell<ChartComponent<PerspectiveTable>>> =
        Rc::new(RefCell::new(ChartComponent::new(config)));

    // Mount once the host div is in the DOM
    {
        let chart = Rc::clone(&chart);
        create_effect(move |_| {
            let Some(div) = host.get() else { return };
            if chart.borrow().phase() != ChartPhase::Unmounted {
                return;
            }
            let viewer = match PerspectiveViewer::create_in(&div, &viewer_tag) {
                Ok(viewer) => viewer,
                Err(e) => {
                    log_error!(LogComponent::Presentation("RatioGraph"), "❌ Cannot create viewer: {}", e);
                    return;
                }
            };
            let worker = PerspectiveWorker::detect();
            chart.borrow_mut().mount(worker.as_ref(), &viewer);
        });
    }

    {
        let chart = Rc::clone(&chart);
        create_effect(move |_| {
            let batch = data.get();
            match chart.borrow_mut().update(&batch) {
                Ok(UpdateOutcome::Appended { rows, alerts }) => {
                    log_trace!(
                        LogComponent::Presentation("RatioGraph"),
                        "appended {} rows ({} alerts)",
                        rows,
                        alerts
                    );
                }
                Ok(UpdateOutcome::Skipped) => {}
                Err(e) => {
                    log_error!(LogComponent::Presentation("RatioGraph"), "❌ Update failed: {}", e);
                }
            }
        });
    }

    on_cleanup(move || chart.borrow_mut().unmount());

    view! { <div class="ratio-graph" node_ref=host></div> }
}
