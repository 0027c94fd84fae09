//! Non-blocking confirmation toast.
//!
//! Mounted once at the end of `<body>`. Each [`CartEvent`] with a message
//! replaces the current text and restarts the dismiss timer.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::notify::{CartEvent, Notifier};

pub struct ToastNotifier {
    message: RwSignal<Option<String>>,
    duration_ms: u32,
    dismiss: Option<Timeout>,
}

impl ToastNotifier {
    /// Mount the toast into `<body>`.
    pub fn mount(duration_ms: u32) -> Self {
        let message = RwSignal::new(None::<String>);
        leptos::mount::mount_to_body(move || view! { <CartToast message=message/> });
        Self { message, duration_ms, dismiss: None }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&mut self, event: &CartEvent) {
        let Some(text) = event.message() else {
            return;
        };
        self.message.set(Some(text));
        let message = self.message;
        // Dropping the previous timeout cancels it.
        self.dismiss = Some(Timeout::new(self.duration_ms, move || message.set(None)));
    }
}

#[component]
fn CartToast(message: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class="cart-toast" role="status" aria-live="polite">
                {move || message.get().unwrap_or_default()}
            </div>
        </Show>
    }
}
