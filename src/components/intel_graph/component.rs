use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent, WheelEvent, Window};

use super::controller::Outcome;
use super::details::{DetailPanel, Tooltip};
use super::render;
use super::state::IntelGraphState;
use super::style::style_for;
use super::surface::CanvasSurface;
use super::types::GraphData;

const TOOLTIP_OFFSET: f64 = 6.0;

struct Mounted {
	state: IntelGraphState,
	surface: CanvasSurface,
}

impl Mounted {
	fn repaint(&mut self) {
		if let Err(err) = render::render(&self.state, &mut self.surface) {
			warn!("skipping frame: {err}");
		}
	}
}

/// Window resize subscription, removed again on drop.
struct ResizeListener {
	window: Window,
	callback: Closure<dyn FnMut()>,
}

impl Drop for ResizeListener {
	fn drop(&mut self) {
		let _ = self
			.window
			.remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref());
	}
}

/// Signals feeding the DOM overlays around the canvas.
#[derive(Clone, Copy)]
struct Overlay {
	cursor: WriteSignal<&'static str>,
	tooltip: WriteSignal<Option<Tooltip>>,
	panel: WriteSignal<Option<DetailPanel>>,
	on_select: Option<Callback<Option<String>>>,
}

impl Overlay {
	/// Repaint if needed and refresh overlays. Returns the new selection
	/// when it changed.
	fn apply(&self, m: &mut Mounted, outcome: Outcome) -> Option<Option<String>> {
		if outcome.redraw {
			m.repaint();
		}
		self.cursor.set(m.state.cursor().as_css());
		// The tooltip hangs off the node, so it moves with drags and pans too.
		if outcome.redraw || outcome.hover_changed {
			self.tooltip.set(m.state.tooltip_entity().and_then(|entity| {
				let (x, y) = m.state.positions.get(&entity.id)?;
				let (sx, sy) = m.state.viewport.world_to_screen(x, y);
				let reach = style_for(&entity.kind).radius * m.state.viewport.k;
				Some(Tooltip::new(entity, sx + reach, sy - reach))
			}));
		}
		if !outcome.selection_changed {
			return None;
		}
		self.panel.set(
			m.state
				.selected_entity()
				.map(|entity| DetailPanel::new(entity, &m.state.model)),
		);
		Some(m.state.selected_id().map(str::to_owned))
	}

	fn reset(&self) {
		self.cursor.set("grab");
		self.tooltip.set(None);
		self.panel.set(None);
	}
}

/// Run `action` against the mounted engine, then notify the host outside the borrow.
fn dispatch(
	engine: &RefCell<Option<Mounted>>,
	overlay: Overlay,
	action: impl FnOnce(&mut IntelGraphState) -> Outcome,
) {
	let selection = {
		let mut slot = engine.borrow_mut();
		let Some(m) = slot.as_mut() else {
			return;
		};
		let outcome = action(&mut m.state);
		overlay.apply(m, outcome)
	};
	if let (Some(selected), Some(on_select)) = (selection, overlay.on_select) {
		on_select.run(selected);
	}
}

fn surface_size(
	window: &Window,
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		return (
			window
				.inner_width()
				.ok()
				.and_then(|w| w.as_f64())
				.unwrap_or(800.0),
			window
				.inner_height()
				.ok()
				.and_then(|h| h.as_f64())
				.unwrap_or(600.0),
		);
	}
	(
		width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

/// Interactive entity/relation diagram for a scan result.
///
/// Drag nodes to move them, drag the background to pan, scroll to zoom and
/// click a node to open its detail panel. `on_select` receives the selected
/// node id (or `None`) every time the selection changes.
#[component]
pub fn IntelGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] on_select: Option<Callback<Option<String>>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let engine: Rc<RefCell<Option<Mounted>>> = Rc::new(RefCell::new(None));
	let resize_listener = StoredValue::new_local(None::<ResizeListener>);

	let (cursor, set_cursor) = signal("grab");
	let (tooltip, set_tooltip) = signal(None::<Tooltip>);
	let (panel, set_panel) = signal(None::<DetailPanel>);
	let overlay = Overlay {
		cursor: set_cursor,
		tooltip: set_tooltip,
		panel: set_panel,
		on_select,
	};

	let engine_init = engine.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let data = data.get();
		let Some(window) = web_sys::window() else {
			warn!("no window available, graph canvas disabled");
			return;
		};

		let mut surface = match CanvasSurface::acquire(canvas.clone()) {
			Ok(surface) => surface,
			Err(err) => {
				warn!("graph canvas disabled: {err}");
				return;
			}
		};
		let (w, h) = surface_size(&window, &canvas, fullscreen, width, height);
		surface.resize(w, h, window.device_pixel_ratio());

		let mut mounted = Mounted {
			state: IntelGraphState::new(&data),
			surface,
		};
		mounted.repaint();
		let had_selection = engine_init
			.borrow_mut()
			.replace(mounted)
			.is_some_and(|old| old.state.selected_id().is_some());
		overlay.reset();
		if let (true, Some(on_select)) = (had_selection, on_select) {
			on_select.run(None);
		}

		let (engine_resize, canvas_resize) = (engine_init.clone(), canvas.clone());
		let callback = Closure::<dyn FnMut()>::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = surface_size(&win, &canvas_resize, fullscreen, width, height);
			if let Some(m) = engine_resize.borrow_mut().as_mut() {
				m.surface.resize(nw, nh, win.device_pixel_ratio());
				m.repaint();
			}
		});
		if window
			.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
			.is_err()
		{
			warn!("could not subscribe to window resize");
		}
		// Replacing the old listener drops it, which unsubscribes it.
		resize_listener.set_value(Some(ResizeListener { window, callback }));
	});

	on_cleanup(move || {
		resize_listener.try_update_value(|listener| {
			listener.take();
		});
	});

	let pointer_at = move |client_x: f64, client_y: f64| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((client_x - rect.left(), client_y - rect.top()))
	};
	let mouse_at = move |ev: &MouseEvent| pointer_at(ev.client_x() as f64, ev.client_y() as f64);
	let touch_at = move |ev: &TouchEvent| {
		ev.changed_touches()
			.get(0)
			.and_then(|t| pointer_at(t.client_x() as f64, t.client_y() as f64))
	};

	let engine_md = engine.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = mouse_at(&ev) else { return };
		dispatch(&engine_md, overlay, |s| s.pointer_down(x, y));
	};

	let engine_mm = engine.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = mouse_at(&ev) else { return };
		dispatch(&engine_mm, overlay, |s| s.pointer_move(x, y));
	};

	let engine_mu = engine.clone();
	let on_mouseup = move |_: MouseEvent| {
		dispatch(&engine_mu, overlay, IntelGraphState::pointer_up);
	};

	let engine_ml = engine.clone();
	let on_mouseleave = move |_: MouseEvent| {
		dispatch(&engine_ml, overlay, IntelGraphState::pointer_leave);
	};

	let engine_cl = engine.clone();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = mouse_at(&ev) else { return };
		dispatch(&engine_cl, overlay, |s| s.click(x, y));
	};

	let engine_wh = engine.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		dispatch(&engine_wh, overlay, |s| s.wheel(ev.delta_y()));
	};

	// Touch: one finger drives the same state machine; lifting it counts as a tap.
	let engine_ts = engine.clone();
	let on_touchstart = move |ev: TouchEvent| {
		ev.prevent_default();
		let Some((x, y)) = touch_at(&ev) else { return };
		dispatch(&engine_ts, overlay, |s| s.pointer_down(x, y));
	};

	let engine_tm = engine.clone();
	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		let Some((x, y)) = touch_at(&ev) else { return };
		dispatch(&engine_tm, overlay, |s| s.pointer_move(x, y));
	};

	let engine_te = engine.clone();
	let on_touchend = move |ev: TouchEvent| {
		ev.prevent_default();
		dispatch(&engine_te, overlay, IntelGraphState::pointer_up);
		if let Some((x, y)) = touch_at(&ev) {
			dispatch(&engine_te, overlay, |s| s.click(x, y));
		}
	};

	let engine_zi = engine.clone();
	let on_zoom_in = move |_: MouseEvent| {
		dispatch(&engine_zi, overlay, IntelGraphState::zoom_in);
	};

	let engine_zo = engine.clone();
	let on_zoom_out = move |_: MouseEvent| {
		dispatch(&engine_zo, overlay, IntelGraphState::zoom_out);
	};

	let engine_rv = engine.clone();
	let on_reset = move |_: MouseEvent| {
		dispatch(&engine_rv, overlay, IntelGraphState::reset_view);
	};

	let engine_cs = engine.clone();
	let on_clear = move |_: MouseEvent| {
		dispatch(&engine_cs, overlay, IntelGraphState::clear_selection);
	};

	view! {
		<div class="intel-graph" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="intel-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:click=on_click
				on:wheel=on_wheel
				on:touchstart=on_touchstart
				on:touchmove=on_touchmove
				on:touchend=on_touchend
				style=move || format!("display: block; cursor: {};", cursor.get())
			/>
			<div class="intel-graph-controls">
				<button title="Zoom in" on:click=on_zoom_in>"+"</button>
				<button title="Zoom out" on:click=on_zoom_out>"-"</button>
				<button title="Reset view" on:click=on_reset>"Reset"</button>
			</div>
			{move || {
				tooltip
					.get()
					.map(|tip| {
						view! {
							<div
								class="intel-graph-tooltip"
								style=format!(
									"position: absolute; pointer-events: none; left: {}px; top: {}px;",
									tip.x + TOOLTIP_OFFSET,
									tip.y + TOOLTIP_OFFSET,
								)
							>
								<strong>{tip.label}</strong>
								<span class="kind">{tip.kind}</span>
								<ul>
									{tip.lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
								</ul>
							</div>
						}
					})
			}}
			<aside
				class="intel-graph-panel"
				style:display=move || if panel.with(Option::is_some) { "block" } else { "none" }
			>
				<button class="close" title="Clear selection" on:click=on_clear>"x"</button>
				{move || {
					panel
						.get()
						.map(|p| {
							view! {
								<h3>{p.label}</h3>
								<p class="kind">{p.kind}</p>
								<p class="id">{p.id}</p>
								<ul class="attributes">
									{p.lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
								</ul>
								<h4>"Connections"</h4>
								<ul class="connections">
									{p
										.connections
										.into_iter()
										.map(|c| {
											view! {
												<li title=c.other_id>
													<span class="relationship">{c.relationship}</span>
													" "
													{c.other_label}
												</li>
											}
										})
										.collect_view()}
								</ul>
							}
						})
				}}
			</aside>
		</div>
	}
}
