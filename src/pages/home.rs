use leptos::prelude::*;
use log::{error, info};

use crate::components::intel_graph::{GraphData, IntelGraphCanvas};

const SAMPLE_SCAN: &str = include_str!("../../demos/sample_scan.json");

/// Load the bundled scan export. A broken payload yields an empty graph.
fn load_sample_scan() -> GraphData {
	GraphData::from_json(SAMPLE_SCAN).unwrap_or_else(|err| {
		error!("sample scan payload is malformed: {err}");
		GraphData::default()
	})
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(load_sample_scan);
	let (selected, set_selected) = signal(None::<String>);
	let on_select = Callback::new(move |id: Option<String>| {
		info!("selection changed: {id:?}");
		set_selected.set(id);
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<IntelGraphCanvas data=graph_data fullscreen=true on_select=on_select />
				<div class="graph-overlay">
					<h1>"Intelligence Graph"</h1>
					<p class="subtitle">
						"Drag nodes to reposition. Scroll to zoom. Drag background to pan. Click a node for details."
					</p>
					<p class="selection">
						{move || match selected.get() {
							Some(id) => format!("Selected: {id}"),
							None => "Nothing selected".to_string(),
						}}
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
