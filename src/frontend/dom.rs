//! DOM resources that must be released when a component unmounts. Each
//! guard undoes its registration on drop, so an effect's cleanup only has
//! to drop what it created.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    window, AddEventListenerOptions, Element, Event, EventTarget, HtmlElement, HtmlVideoElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior,
    ScrollToOptions,
};

use crate::grid::PlaybackCommand;
use crate::nav::ScrollSurface;
use crate::site;

pub struct EventListenerGuard {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListenerGuard {
    pub fn new(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Self {
        Self::register(target, event, handler, false)
    }

    /// Listener that never calls `preventDefault`, so the browser does not
    /// wait on it before scrolling.
    pub fn passive(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Self {
        Self::register(target, event, handler, true)
    }

    fn register(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
        passive: bool,
    ) -> Self {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);

        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        );

        Self {
            target: target.clone(),
            event,
            callback,
        }
    }
}

impl Drop for EventListenerGuard {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Runs `frame` on every animation frame until dropped.
pub struct AnimationFrameLoop {
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl AnimationFrameLoop {
    pub fn start(mut frame: impl FnMut() + 'static) -> Self {
        let handle = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let next_callback = callback.clone();
        let next_handle = handle.clone();
        *callback.borrow_mut() = Some(Closure::new(move || {
            frame();
            next_handle.set(next_callback.borrow().as_ref().and_then(request_frame));
        }));

        handle.set(callback.borrow().as_ref().and_then(request_frame));
        Self { handle, callback }
    }
}

impl Drop for AnimationFrameLoop {
    fn drop(&mut self) {
        if let (Some(handle), Some(win)) = (self.handle.take(), window()) {
            let _ = win.cancel_animation_frame(handle);
        }
        // The closure holds a clone of `callback`; taking it breaks the cycle.
        self.callback.borrow_mut().take();
    }
}

fn request_frame(callback: &Closure<dyn FnMut()>) -> Option<i32> {
    window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

/// Reports whether `element` is at least `threshold` visible.
pub struct IntersectionGuard {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl IntersectionGuard {
    pub fn observe(element: &Element, threshold: f64, mut on_change: impl FnMut(bool) + 'static) -> Option<Self> {
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            if let Ok(entry) = entries.get(0).dyn_into::<IntersectionObserverEntry>() {
                on_change(entry.is_intersecting());
            }
        });

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
        observer.observe(element);

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for IntersectionGuard {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// The scrolling content panel, seen through [`ScrollSurface`].
pub struct ContainerSurface {
    element: HtmlElement,
}

impl ContainerSurface {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl ScrollSurface for ContainerSurface {
    fn scroll_top(&self) -> f64 {
        f64::from(self.element.scroll_top())
    }

    fn anchor_top(&self, id: &str) -> Option<f64> {
        let selector = format!("#{}", site::section_anchor_id(id));
        let anchor = self.element.query_selector(&selector).ok().flatten()?;
        let anchor = anchor.dyn_into::<HtmlElement>().ok()?;
        Some(f64::from(anchor.offset_top()))
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.element.scroll_to_with_scroll_to_options(&options);
    }
}

/// Fire-and-forget play/pause. A rejected `play()` (autoplay policy, missing
/// source) leaves the element on its current frame.
pub fn apply_playback(video: &HtmlVideoElement, command: PlaybackCommand) {
    match command {
        PlaybackCommand::Play => {
            if let Ok(promise) = video.play() {
                spawn_local(async move {
                    let _ = JsFuture::from(promise).await;
                });
            }
        }
        PlaybackCommand::Pause => {
            let _ = video.pause();
        }
    }
}

pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}
