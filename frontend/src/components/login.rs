use deptdesk_shared::{Field, FormErrors, FormKind, LoginForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::field::{FormField, PasswordField};
use crate::components::icons::{KeyRound, Mail};
use crate::phase::{SubmitError, SubmitPhase};
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FormErrors::clean(FormKind::Login));
    let phase = RwSignal::new(SubmitPhase::Idle);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        errors.set(FormErrors::clean(FormKind::Login));

        let service = auth.auth_service();
        spawn_local(async move {
            match service.submit_login(&form, &phase).await {
                // 路由服务监听认证状态，会自动跳转到首页
                Ok(_) => auth.sync(),
                Err(SubmitError::Invalid(e)) => errors.set(e),
                // 失败信息已写入 phase
                Err(_) => {}
            }
        });
    };

    let is_submitting = move || phase.with(SubmitPhase::is_submitting);
    let email_error = Signal::derive(move || errors.with(|e| e.message(Field::Email)));
    let password_error = Signal::derive(move || errors.with(|e| e.message(Field::Password)));

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-5xl font-bold">"Login"</h1>
                    <p class="font-semibold text-base-content/70">"Welcome back!"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <Show when=move || phase.with(|p| p.error().is_some())>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || phase.with(|p| p.error().map(str::to_string))}</span>
                            </div>
                        </Show>

                        <FormField placeholder="Email" input_type="email" value=email error=email_error>
                            <Mail attr:class="h-4 w-4 opacity-70" />
                        </FormField>
                        <PasswordField value=password error=password_error>
                            <KeyRound attr:class="h-4 w-4 opacity-70" />
                        </PasswordField>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=is_submitting>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Submit".into_any()
                                }}
                            </button>
                        </div>

                        <p class="text-center text-base-content/60">
                            "Don't have an account? "
                            <Link to=AppRoute::Register class="link link-primary">"Register here"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
