//! `HtmlAudioElement` media resource

use crate::{
    error::{PlaybackError, Result},
    media::{MediaNotification, MediaResource},
    PlaybackController,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, HtmlAudioElement};

/// Handle used by DOM callbacks to reach the owning controller
pub type ControllerHandle = Weak<RefCell<PlaybackController<HtmlAudioResource>>>;

type Backlog = Rc<RefCell<VecDeque<MediaNotification>>>;

type Listener = Closure<dyn FnMut(Event)>;

/// Media resource backed by an HTML audio element
///
/// DOM events are turned into [`MediaNotification`]s and delivered to the
/// controller. A notification that arrives while the controller is busy is
/// kept in a backlog and delivered on the next controller entry.
pub struct HtmlAudioResource {
    element: HtmlAudioElement,

    /// URI as given by the controller (`element.src()` is resolved to an absolute URL)
    source: Rc<RefCell<Option<String>>>,

    controller: ControllerHandle,
    backlog: Backlog,
    listeners: Vec<(&'static str, Listener)>,
}

impl HtmlAudioResource {
    /// Wrap an audio element
    pub fn new(element: HtmlAudioElement, controller: ControllerHandle) -> Self {
        Self {
            element,
            source: Rc::new(RefCell::new(None)),
            controller,
            backlog: Rc::new(RefCell::new(VecDeque::new())),
            listeners: Vec::new(),
        }
    }

    /// Underlying element
    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }

    /// Take the oldest undelivered notification
    pub fn pop_backlog(&self) -> Option<MediaNotification> {
        pop(&self.backlog)
    }

    fn listener(
        &self,
        build: fn(&HtmlAudioElement, String) -> MediaNotification,
    ) -> Listener {
        let element = self.element.clone();
        let source = Rc::clone(&self.source);
        let controller = self.controller.clone();
        let backlog = Rc::clone(&self.backlog);

        Closure::wrap(Box::new(move |_event: Event| {
            let Some(current) = source.borrow().clone() else {
                return;
            };
            dispatch(&controller, &backlog, build(&element, current));
        }) as Box<dyn FnMut(Event)>)
    }
}

impl MediaResource for HtmlAudioResource {
    fn source(&self) -> Option<String> {
        self.source.borrow().clone()
    }

    fn set_source(&mut self, uri: &str) {
        *self.source.borrow_mut() = Some(uri.to_string());
        self.element.set_src(uri);
    }

    fn load(&mut self) {
        self.element.load();
    }

    fn play(&mut self) -> Result<()> {
        let promise = self
            .element
            .play()
            .map_err(|e| PlaybackError::Media(describe(&e)))?;

        let source = self.source.borrow().clone().unwrap_or_default();
        let controller = self.controller.clone();
        let backlog = Rc::clone(&self.backlog);

        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                dispatch(
                    &controller,
                    &backlog,
                    MediaNotification::PlayRejected {
                        source,
                        reason: describe(&e),
                    },
                );
            }
        });

        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.element
            .pause()
            .map_err(|e| PlaybackError::Media(describe(&e)))
    }

    fn seek(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn set_volume(&mut self, volume: f32) {
        self.element.set_volume(f64::from(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.element.set_muted(muted);
    }

    fn attach(&mut self) -> Result<()> {
        let handlers: [(&'static str, fn(&HtmlAudioElement, String) -> MediaNotification); 5] = [
            ("loadedmetadata", |element, source| {
                MediaNotification::MetadataLoaded {
                    source,
                    duration: element.duration(),
                }
            }),
            ("timeupdate", |element, source| MediaNotification::TimeUpdate {
                source,
                position: element.current_time(),
            }),
            ("ended", |_, source| MediaNotification::Ended { source }),
            ("playing", |_, source| MediaNotification::PlaybackStarted {
                source,
            }),
            ("pause", |_, source| MediaNotification::PlaybackPaused {
                source,
            }),
        ];

        for (event, build) in handlers {
            let listener = self.listener(build);
            self.element
                .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
                .map_err(|e| PlaybackError::Media(describe(&e)))?;
            self.listeners.push((event, listener));
        }

        Ok(())
    }

    fn detach(&mut self) {
        for (event, listener) in self.listeners.drain(..) {
            let _ = self
                .element
                .remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
        }

        let _ = self.element.pause();
        let _ = self.element.remove_attribute("src");
        self.element.load();
    }
}

/// Deliver a notification, or park it if the controller is busy or gone
fn dispatch(controller: &ControllerHandle, backlog: &Backlog, notification: MediaNotification) {
    backlog.borrow_mut().push_back(notification);

    let Some(controller) = controller.upgrade() else {
        return;
    };
    let Ok(mut controller) = controller.try_borrow_mut() else {
        return;
    };

    while let Some(notification) = pop(backlog) {
        controller.handle_notification(notification);
    }
}

fn pop(backlog: &Backlog) -> Option<MediaNotification> {
    backlog.borrow_mut().pop_front()
}

fn describe(error: &JsValue) -> String {
    js_sys::Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .or_else(|| error.as_string())
        .unwrap_or_else(|| "unknown media error".to_string())
}
