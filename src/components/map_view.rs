use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, MouseEvent, TouchEvent, WheelEvent};
use yew::prelude::*;

use crate::config::MapConfig;
use crate::model::{self, MarkerLocation, ORIGINS};
use crate::state::{
    AnimationLoop, InputOutcome, InputTranslator, LayoutStatus, Motion, PointerInput, RafScheduler,
    SelectionAction, SelectionState, Viewport,
};
use crate::util::{ListenerSet, navigate, target_within};

use super::{
    detail_panel::DetailPanel, legend_panel::LegendPanel, map_controls::MapControls,
    marker_pin::MarkerPin,
};

const MARKER_SELECTOR: &str = ".origin-marker";
const DETAIL_SELECTOR: &str = ".origin-detail";
const FADE_IN_MS: i32 = 300;

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub config: MapConfig,
}

/// Everything the mounted map holds on to; dropping it detaches the map.
struct MapSession {
    listeners: ListenerSet,
    animation: AnimationLoop<RafScheduler>,
}

impl Drop for MapSession {
    fn drop(&mut self) {
        self.animation.stop();
        let count = self.listeners.len();
        self.listeners.clear();
        log::debug!(
            "map detached: {count} listeners removed, {} frames pending",
            self.animation.pending_frames()
        );
    }
}

fn paint(content_ref: &NodeRef, vp: &Viewport) {
    let Some(el) = content_ref.cast::<HtmlElement>() else {
        return;
    };
    let style = el.style();
    let _ = style.set_property("transform", &vp.css_transform());
    let cursor = if vp.motion == Motion::Dragging {
        "grabbing"
    } else {
        "grab"
    };
    let _ = style.set_property("cursor", cursor);
}

/// Measures the container and updates the viewport bounds. Returns false
/// while the container has no usable size; only the start and end of such a
/// wait are logged.
fn measure(
    container_ref: &NodeRef,
    viewport: &RefCell<Viewport>,
    layout: &Cell<LayoutStatus>,
) -> bool {
    let Some(container) = container_ref.cast::<HtmlElement>() else {
        return false;
    };
    let w = container.client_width() as f64;
    let h = container.client_height() as f64;
    let mut status = layout.get();
    let measured = match viewport.borrow_mut().resize(w, h) {
        Ok(b) => {
            if status.record_success() {
                log::debug!("map container laid out at {w}x{h}");
            }
            log::debug!(
                "map bounds x:[{}, {}] y:[{}, {}]",
                b.min_x,
                b.max_x,
                b.min_y,
                b.max_y
            );
            true
        }
        Err(err) => {
            if status.record_failure() {
                log::debug!("map bounds unavailable: {err}");
            }
            false
        }
    };
    layout.set(status);
    measured
}

fn first_touch(e: &TouchEvent) -> Option<(f64, f64)> {
    e.touches()
        .item(0)
        .map(|t| (t.client_x() as f64, t.client_y() as f64))
}

fn attach(
    container_ref: &NodeRef,
    content_ref: &NodeRef,
    viewport: Rc<RefCell<Viewport>>,
    input: Rc<RefCell<InputTranslator>>,
    selection: UseReducerHandle<SelectionState>,
) -> Option<MapSession> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let container = container_ref.cast::<HtmlElement>()?;
    let content = content_ref.cast::<HtmlElement>()?;

    let layout = Rc::new(Cell::new(LayoutStatus::default()));
    if !measure(container_ref, &viewport, &layout) {
        log::info!("map container not laid out yet, input disabled until it is");
    }
    paint(content_ref, &viewport.borrow());

    // Feeds one input into the translator and repaints when something changed.
    let dispatch: Rc<dyn Fn(PointerInput) -> InputOutcome> = {
        let viewport = viewport.clone();
        let input = input.clone();
        let content_ref = content_ref.clone();
        Rc::new(move |event| {
            let mut vp = viewport.borrow_mut();
            let outcome = input.borrow_mut().handle(&mut vp, event);
            if outcome != InputOutcome::Ignored {
                paint(&content_ref, &vp);
            }
            outcome
        })
    };

    let mut listeners = ListenerSet::default();

    // Mouse: press on the map, track and release on the window
    {
        let dispatch = dispatch.clone();
        listeners.listen(&content, "mousedown", move |e| {
            let Some(me) = e.dyn_ref::<MouseEvent>() else {
                return;
            };
            if me.button() != 0 || target_within(&e, MARKER_SELECTOR) {
                return;
            }
            let (x, y, t) = (me.client_x() as f64, me.client_y() as f64, e.time_stamp());
            if dispatch(PointerInput::MouseDown { x, y, t }) == InputOutcome::DragStarted {
                e.prevent_default();
            }
        });
    }
    {
        let dispatch = dispatch.clone();
        let input = input.clone();
        listeners.listen(&window, "mousemove", move |e| {
            // hovering over the page is not a gesture
            if !input.borrow().is_dragging() {
                return;
            }
            if let Some(me) = e.dyn_ref::<MouseEvent>() {
                let (x, y, t) = (me.client_x() as f64, me.client_y() as f64, e.time_stamp());
                dispatch(PointerInput::MouseMove { x, y, t });
            }
        });
    }
    {
        let dispatch = dispatch.clone();
        listeners.listen(&window, "mouseup", move |e| {
            dispatch(PointerInput::MouseUp { t: e.time_stamp() });
        });
    }

    // Touch: single contact only
    {
        let dispatch = dispatch.clone();
        listeners.listen(&content, "touchstart", move |e| {
            let Some(te) = e.dyn_ref::<TouchEvent>() else {
                return;
            };
            if target_within(&e, MARKER_SELECTOR) {
                return;
            }
            let touches = te.touches().length();
            let (x, y) = first_touch(te).unwrap_or((0.0, 0.0));
            let outcome = dispatch(PointerInput::TouchStart {
                touches,
                x,
                y,
                t: e.time_stamp(),
            });
            if outcome == InputOutcome::DragStarted {
                e.prevent_default();
            }
        });
    }
    {
        let dispatch = dispatch.clone();
        listeners.listen(&content, "touchmove", move |e| {
            let Some(te) = e.dyn_ref::<TouchEvent>() else {
                return;
            };
            let Some((x, y)) = first_touch(te) else {
                return;
            };
            let touches = te.touches().length();
            let outcome = dispatch(PointerInput::TouchMove {
                touches,
                x,
                y,
                t: e.time_stamp(),
            });
            if outcome == InputOutcome::Moved {
                e.prevent_default();
            }
        });
    }
    {
        let dispatch = dispatch.clone();
        listeners.listen(&content, "touchend", move |e| {
            if let Some(te) = e.dyn_ref::<TouchEvent>() {
                let touches = te.touches().length();
                dispatch(PointerInput::TouchEnd {
                    touches,
                    t: e.time_stamp(),
                });
            }
        });
    }
    {
        let dispatch = dispatch.clone();
        listeners.listen(&content, "touchcancel", move |_e| {
            dispatch(PointerInput::Cancel);
        });
    }

    // Wheel zoom; the page never scrolls while over the map
    {
        let dispatch = dispatch.clone();
        listeners.listen(&container, "wheel", move |e| {
            e.prevent_default();
            if let Some(we) = e.dyn_ref::<WheelEvent>() {
                dispatch(PointerInput::Wheel {
                    delta_y: we.delta_y(),
                });
            }
        });
    }

    {
        let container_ref = container_ref.clone();
        let content_ref = content_ref.clone();
        let viewport = viewport.clone();
        let layout = layout.clone();
        listeners.listen(&window, "resize", move |_e| {
            if measure(&container_ref, &viewport, &layout) {
                paint(&content_ref, &viewport.borrow());
            }
        });
    }

    // Outside click clears the selection
    listeners.listen(&document, "mousedown", move |e| {
        if !target_within(&e, MARKER_SELECTOR) && !target_within(&e, DETAIL_SELECTOR) {
            selection.dispatch(SelectionAction::Clear);
        }
    });

    let animation = {
        let container_ref = container_ref.clone();
        let content_ref = content_ref.clone();
        let viewport = viewport.clone();
        AnimationLoop::new(RafScheduler::new(window.clone()), move || {
            let ready = viewport.borrow().bounds().is_some();
            if !ready && !measure(&container_ref, &viewport, &layout) {
                return;
            }
            let mut vp = viewport.borrow_mut();
            if vp.step() {
                paint(&content_ref, &vp);
            }
        })
    };
    animation.start();

    log::info!(
        "origins map attached: {} listeners, {} markers, frame loop running: {}",
        listeners.len(),
        ORIGINS.len(),
        animation.is_running()
    );
    Some(MapSession {
        listeners,
        animation,
    })
}

#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let container_ref = use_node_ref();
    let content_ref = use_node_ref();
    let viewport = use_mut_ref(|| Viewport::new(props.config.clone()));
    let input = use_mut_ref(|| InputTranslator::new(props.config.velocity_window_ms));
    let selection = use_reducer(SelectionState::default);
    let loaded = use_state(|| false);

    // Fade the map in shortly after mount
    {
        let loaded = loaded.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let cb = Closure::wrap(Box::new(move || loaded.set(true)) as Box<dyn FnMut()>);
            let timer = window.as_ref().and_then(|w| {
                w.set_timeout_with_callback_and_timeout_and_arguments_0(
                    cb.as_ref().unchecked_ref(),
                    FADE_IN_MS,
                )
                .ok()
            });
            move || {
                if let (Some(w), Some(id)) = (window, timer) {
                    w.clear_timeout_with_handle(id);
                }
                drop(cb);
            }
        });
    }

    // Main mount effect (listeners, frame loop)
    {
        let container_ref = container_ref.clone();
        let content_ref = content_ref.clone();
        let viewport = viewport.clone();
        let input = input.clone();
        let selection = selection.clone();
        use_effect_with((), move |_| {
            let session = attach(&container_ref, &content_ref, viewport, input, selection);
            if session.is_none() {
                log::warn!("origins map could not attach to the page");
            }
            move || drop(session)
        });
    }

    let zoom_by = |step: f64| {
        let viewport = viewport.clone();
        let content_ref = content_ref.clone();
        Callback::from(move |()| {
            let mut vp = viewport.borrow_mut();
            vp.apply_zoom_delta(step);
            paint(&content_ref, &vp);
        })
    };
    let zoom_in_cb = zoom_by(props.config.zoom_step);
    let zoom_out_cb = zoom_by(-props.config.zoom_step);
    let recenter_cb: Callback<()> = {
        let viewport = viewport.clone();
        let content_ref = content_ref.clone();
        Callback::from(move |()| {
            let mut vp = viewport.borrow_mut();
            vp.recenter();
            paint(&content_ref, &vp);
        })
    };

    let select_cb: Callback<model::MarkerId> = {
        let selection = selection.clone();
        let viewport = viewport.clone();
        Callback::from(move |id: model::MarkerId| {
            if let Some(m) = model::find_marker(id) {
                let (x, y) = m.project(&viewport.borrow());
                log::debug!("marker {} clicked at ({x:.0}, {y:.0})", id.as_str());
            }
            selection.dispatch(SelectionAction::Toggle(id));
        })
    };
    let close_cb: Callback<()> = {
        let selection = selection.clone();
        Callback::from(move |()| selection.dispatch(SelectionAction::Clear))
    };
    let view_beans_cb: Callback<&'static MarkerLocation> = Callback::from(|m: &'static MarkerLocation| {
        let href = m.beans_url();
        log::info!("viewing beans for {}", m.id.as_str());
        navigate(&href);
    });

    let selected = selection.active.and_then(model::find_marker);
    let is_loaded = *loaded;
    let (content_style, fade_style) = {
        let vp = viewport.borrow();
        let cursor = if vp.motion == Motion::Dragging {
            "grabbing"
        } else {
            "grab"
        };
        (
            format!(
                "position:relative; width:{pct}%; height:{pct}%; transform-origin:center; transform:{}; cursor:{cursor}; \
                 background-image:url('/images/coffee-map-bg.jpg'); background-size:cover; background-position:center; \
                 opacity:{}; transition:opacity 0.6s ease; touch-action:none; user-select:none;",
                vp.css_transform(),
                if is_loaded { 1 } else { 0 },
                pct = vp.config().content_multiple * 100.0,
            ),
            format!(
                "position:absolute; top:2rem; left:2rem; z-index:5; transition:opacity 0.8s ease, transform 0.8s ease; opacity:{}; transform:{};",
                if is_loaded { 1 } else { 0 },
                if is_loaded { "translateY(0)" } else { "translateY(20px)" }
            ),
        )
    };

    html! {<div ref={container_ref.clone()} id="origins-map" style="position:relative; width:100%; height:100vh; overflow:hidden; background:#faf6f2;">
        <div style={fade_style}>
            <h1 style="font-size:2.5rem; font-family:'Playfair Display', serif; color:#5d342f; margin:0 0 10px 0;">{"Coffee Bean Origins"}</h1>
            <p style="color:#666; max-width:500px;">
                {"Explore our interactive map to discover the unique coffee growing regions around the world and learn about the distinctive characteristics of each region's beans."}
            </p>
        </div>
        <div ref={content_ref.clone()} style={content_style}>
            { for ORIGINS.iter().map(|m| html! {
                <MarkerPin key={m.id.as_str()} marker={m} active={selection.is_active(m.id)} loaded={is_loaded} on_select={select_cb.clone()} />
            }) }
        </div>
        <LegendPanel loaded={is_loaded} origin_count={ORIGINS.len()} />
        <MapControls on_zoom_in={zoom_in_cb} on_zoom_out={zoom_out_cb} on_recenter={recenter_cb} />
        <DetailPanel marker={selected} on_close={close_cb} on_view_beans={view_beans_cb} />
    </div>}
}
