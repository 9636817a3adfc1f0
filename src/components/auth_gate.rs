//! Auth Gate Component
//!
//! Email/password sign-in and sign-up shown while there is no session.

use leptos::prelude::*;
use leptos::task::spawn_local;
use task_store::Credentials;

use crate::commands::{self, SignUpOutcome};
use crate::context::use_app_context;

#[derive(Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    SignIn,
    SignUp,
}

#[component]
pub fn AuthGate() -> impl IntoView {
    let ctx = use_app_context();

    let (mode, set_mode) = signal(AuthMode::SignIn);
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(ctx.config_error());
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);
    let configured = ctx.service().is_some();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credentials = Credentials::new(email.get_untracked().trim(), password.get_untracked());
        if credentials.email.is_empty() || credentials.password.is_empty() {
            set_error.set(Some("Email and password are required".to_string()));
            return;
        }
        set_error.set(None);
        set_notice.set(None);
        set_busy.set(true);

        let current_mode = mode.get_untracked();
        spawn_local(async move {
            // On success the session switches and this component goes away,
            // so only the failure and confirmation paths touch local signals.
            match current_mode {
                AuthMode::SignIn => {
                    if let Err(message) = commands::sign_in(ctx, credentials).await {
                        set_error.set(Some(message));
                        set_busy.set(false);
                    }
                }
                AuthMode::SignUp => match commands::sign_up(ctx, credentials).await {
                    Ok(SignUpOutcome::SignedIn) => {}
                    Ok(SignUpOutcome::ConfirmationSent) => {
                        set_notice.set(Some(
                            "Check your email to confirm the account, then sign in.".to_string(),
                        ));
                        set_mode.set(AuthMode::SignIn);
                        set_busy.set(false);
                    }
                    Err(message) => {
                        set_error.set(Some(message));
                        set_busy.set(false);
                    }
                },
            }
        });
    };

    let toggle_mode = move |_| {
        set_error.set(None);
        set_notice.set(None);
        set_mode.update(|m| {
            *m = match m {
                AuthMode::SignIn => AuthMode::SignUp,
                AuthMode::SignUp => AuthMode::SignIn,
            }
        });
    };

    view! {
        <div class="auth-screen">
            <form class="auth-form" on:submit=on_submit>
                <h1>"Task Management"</h1>
                <h2>{move || match mode.get() {
                    AuthMode::SignIn => "Sign In",
                    AuthMode::SignUp => "Create Account",
                }}</h2>

                <label for="auth-email">"Email"</label>
                <input
                    id="auth-email"
                    type="email"
                    autocomplete="email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />

                <label for="auth-password">"Password"</label>
                <input
                    id="auth-password"
                    type="password"
                    autocomplete=move || match mode.get() {
                        AuthMode::SignIn => "current-password",
                        AuthMode::SignUp => "new-password",
                    }
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />

                {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
                {move || notice.get().map(|message| view! { <p class="form-notice">{message}</p> })}

                <button
                    type="submit"
                    class="primary-btn"
                    disabled=move || busy.get() || !configured
                >
                    {move || match mode.get() {
                        AuthMode::SignIn => "Sign In",
                        AuthMode::SignUp => "Sign Up",
                    }}
                </button>
                <button type="button" class="link-btn" on:click=toggle_mode>
                    {move || match mode.get() {
                        AuthMode::SignIn => "Need an account? Sign up",
                        AuthMode::SignUp => "Have an account? Sign in",
                    }}
                </button>
            </form>
        </div>
    }
}
