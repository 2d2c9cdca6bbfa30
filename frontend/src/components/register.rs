use deptdesk_shared::{Field, FormErrors, FormKind, RegistrationForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::field::{FormField, PasswordField};
use crate::components::icons::{KeyRound, Mail, User};
use crate::phase::{SubmitError, SubmitPhase};
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FormErrors::clean(FormKind::Registration));
    let phase = RwSignal::new(SubmitPhase::Idle);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let form = RegistrationForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        errors.set(FormErrors::clean(FormKind::Registration));

        let service = auth.auth_service();
        spawn_local(async move {
            match service.submit_register(&form, &phase).await {
                Ok(_) => auth.sync(),
                Err(SubmitError::Invalid(e)) => errors.set(e),
                Err(_) => {}
            }
        });
    };

    let is_submitting = move || phase.with(SubmitPhase::is_submitting);
    let field_error = move |field: Field| Signal::derive(move || errors.with(|e| e.message(field)));

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-5xl font-bold">"Register"</h1>
                    <p class="font-semibold text-base-content/70">"Create a new profile"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <Show when=move || phase.with(|p| p.error().is_some())>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || phase.with(|p| p.error().map(str::to_string))}</span>
                            </div>
                        </Show>

                        <FormField placeholder="Name" value=name error=field_error(Field::Name)>
                            <User attr:class="h-4 w-4 opacity-70" />
                        </FormField>
                        <FormField placeholder="Email" input_type="email" value=email error=field_error(Field::Email)>
                            <Mail attr:class="h-4 w-4 opacity-70" />
                        </FormField>
                        <PasswordField value=password error=field_error(Field::Password)>
                            <KeyRound attr:class="h-4 w-4 opacity-70" />
                        </PasswordField>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=is_submitting>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Submit".into_any()
                                }}
                            </button>
                        </div>

                        <p class="text-center text-base-content/60">
                            "Already have an account? "
                            <Link to=AppRoute::Login class="link link-primary">"Login here"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
