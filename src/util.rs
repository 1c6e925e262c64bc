// Start-up and DOM helpers shared by the map components.
use wasm_bindgen::JsCast;

pub fn init_logging() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // errs only if a logger is already installed
    let _ = console_log::init_with_level(level);
}

/// True when the event target sits inside an element matching `selector`.
pub fn target_within(event: &web_sys::Event, selector: &str) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}

pub fn navigate(href: &str) {
    if let Some(win) = web_sys::window() {
        if let Err(err) = win.location().set_href(href) {
            log::warn!("navigation to {href} failed: {err:?}");
        }
    }
}

/// DOM listeners registered by one component instance; all are removed when
/// the set is cleared or dropped.
#[derive(Default)]
pub struct ListenerSet {
    entries: Vec<(
        web_sys::EventTarget,
        &'static str,
        wasm_bindgen::closure::Closure<dyn FnMut(web_sys::Event)>,
    )>,
}

impl ListenerSet {
    pub fn listen(
        &mut self,
        target: &web_sys::EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) {
        let cb = wasm_bindgen::closure::Closure::wrap(
            Box::new(handler) as Box<dyn FnMut(web_sys::Event)>
        );
        match target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
            Ok(()) => self.entries.push((target.clone(), event, cb)),
            Err(err) => log::warn!("could not listen for {event}: {err:?}"),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        for (target, event, cb) in self.entries.drain(..) {
            let _ = target.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}
