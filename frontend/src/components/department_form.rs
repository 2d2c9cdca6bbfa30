//! 新增部门表单

use deptdesk_shared::{Department, DepartmentForm, Field, FormErrors, FormKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::field::FormField;
use crate::components::icons::Building;
use crate::departments::{DepartmentService, Refresh};
use crate::phase::{SubmitError, SubmitPhase};

/// 把创建结果交给父组件；父组件已卸载时回调已释放，直接跳过
fn finish_create(
    refresh: Refresh,
    on_refreshed: Callback<Vec<Department>>,
    on_close: Callback<()>,
) {
    if let Refresh::Loaded(list) = refresh {
        let _ = on_refreshed.try_run(list);
    }
    let _ = on_close.try_run(());
}

#[component]
pub fn DepartmentFormPanel(
    /// 创建成功并重新拉取到的列表
    #[prop(into)]
    on_refreshed: Callback<Vec<Department>>,
    /// 关闭面板（成功或取消）
    #[prop(into)]
    on_close: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();

    let dept_name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let errors = RwSignal::new(FormErrors::clean(FormKind::Department));
    let phase = RwSignal::new(SubmitPhase::Idle);

    let reset_form = move || {
        dept_name.set(String::new());
        description.set(String::new());
        errors.set(FormErrors::clean(FormKind::Department));
        phase.update(SubmitPhase::reset);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let form = DepartmentForm {
            dept_name: dept_name.get_untracked(),
            description: description.get_untracked(),
        };
        errors.set(FormErrors::clean(FormKind::Department));

        let service = DepartmentService::new(auth.api());
        spawn_local(async move {
            match service.submit_create(&form, &phase).await {
                Ok(refresh) => {
                    reset_form();
                    finish_create(refresh, on_refreshed, on_close);
                }
                Err(SubmitError::Invalid(e)) => errors.set(e),
                Err(_) => {}
            }
        });
    };

    let on_cancel = move |_| {
        reset_form();
        let _ = on_close.try_run(());
    };

    let is_submitting = move || phase.with(SubmitPhase::is_submitting);
    let name_error = Signal::derive(move || errors.with(|e| e.message(Field::DeptName)));
    let description_error = move || errors.with(|e| e.message(Field::Description));

    view! {
        <div class="card bg-base-100 shadow-xl mb-6">
            <form class="card-body space-y-2" on:submit=on_submit novalidate>
                <h2 class="card-title">"Add New Department"</h2>

                <Show when=move || phase.with(|p| p.error().is_some())>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || phase.with(|p| p.error().map(str::to_string))}</span>
                    </div>
                </Show>

                <FormField placeholder="Department Name" value=dept_name error=name_error>
                    <Building attr:class="h-4 w-4 opacity-70" />
                </FormField>

                <div class="form-control">
                    <textarea
                        class=move || if description_error().is_some() {
                            "textarea textarea-bordered h-20 w-full textarea-error"
                        } else {
                            "textarea textarea-bordered h-20 w-full"
                        }
                        placeholder="Description"
                        on:input=move |ev| description.set(event_target_value(&ev))
                        prop:value=move || description.get()
                    ></textarea>
                    <p class="text-sm font-semibold text-error mt-1">{description_error}</p>
                </div>

                <div class="card-actions">
                    <button type="submit" class="btn btn-primary" disabled=is_submitting>
                        {move || if is_submitting() { "Adding..." } else { "Add Department" }}
                    </button>
                    <button type="button" class="btn btn-ghost" on:click=on_cancel>
                        "Cancel"
                    </button>
                </div>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::reactive::owner::Owner;
    use std::sync::{Arc, Mutex};

    fn dept(id: &str) -> Department {
        Department {
            id: id.to_string(),
            dept_name: "Finance".to_string(),
            description: "Handles the money".to_string(),
            created_at: String::new(),
        }
    }

    #[test]
    fn created_list_reaches_parent_then_panel_closes() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let owner = Owner::new();
        let (on_refreshed, on_close) = owner.with(|| {
            let refreshed = events.clone();
            let closed = events.clone();
            (
                Callback::new(move |list: Vec<Department>| {
                    refreshed.lock().unwrap().push(format!("refreshed {}", list.len()))
                }),
                Callback::new(move |_: ()| closed.lock().unwrap().push("closed".to_string())),
            )
        });

        finish_create(Refresh::Loaded(vec![dept("d1")]), on_refreshed, on_close);

        assert_eq!(*events.lock().unwrap(), vec!["refreshed 1", "closed"]);
    }

    #[test]
    fn finishing_after_parent_unmounted_is_a_no_op() {
        let owner = Owner::new();
        let (on_refreshed, on_close) = owner.with(|| {
            (
                Callback::new(|_: Vec<Department>| {}),
                Callback::new(|_: ()| {}),
            )
        });
        drop(owner);

        finish_create(Refresh::Loaded(vec![dept("d1")]), on_refreshed, on_close);
    }
}
