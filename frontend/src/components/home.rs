use deptdesk_shared::Department;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::department_detail::DepartmentDetail;
use crate::components::department_form::DepartmentFormPanel;
use crate::components::icons::*;
use crate::departments::{DeleteOutcome, DepartmentService, Refresh};
use crate::web::BrowserConfirm;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let service = StoredValue::new(DepartmentService::new(auth.api()));

    let departments = RwSignal::new(Vec::<Department>::new());
    let loading = RwSignal::new(true);
    let show_form = RwSignal::new(false);
    // 详情弹窗中的记录，与列表互不影响
    let selected = RwSignal::new(Option::<Department>::None);

    let load_departments = move || {
        let service = service.get_value();
        loading.set(true);
        spawn_local(async move {
            if let Ok(list) = service.list().await {
                departments.set(list);
            }
            loading.set(false);
        });
    };

    // 初始加载
    load_departments();

    let handle_delete = move |id: String| {
        let service = service.get_value();
        spawn_local(async move {
            if let Ok(DeleteOutcome::Deleted(Refresh::Loaded(list))) =
                service.delete(&id, &BrowserConfirm).await
            {
                departments.set(list);
            }
        });
    };

    let handle_view = move |id: String| {
        let service = service.get_value();
        spawn_local(async move {
            if let Ok(dept) = service.get(&id).await {
                selected.set(Some(dept));
            }
        });
    };

    let on_logout = move |_| auth.logout();

    let user_name = move || auth.session().map(|s| s.name).unwrap_or_default();
    let is_empty = move || departments.with(Vec::is_empty);

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-xl px-4">
                <div class="flex-1 gap-3">
                    <Building attr:class="text-primary h-7 w-7" />
                    <h1 class="text-2xl font-bold">"Department Management"</h1>
                </div>
                <div class="flex-none gap-4">
                    <span class="text-base-content/70">"Welcome, " {user_name}</span>
                    <button on:click=on_logout class="btn btn-error btn-sm gap-2">
                        <LogOut attr:class="h-4 w-4" /> "Logout"
                    </button>
                </div>
            </div>

            <div class="container mx-auto p-6">
                <div class="mb-6">
                    <button
                        class="btn btn-primary gap-2"
                        on:click=move |_| show_form.update(|open| *open = !*open)
                    >
                        <Plus attr:class="h-5 w-5" /> "Add Department"
                    </button>
                </div>

                // 表单始终挂载，只切换可见性：提交中的回调不会随面板一起被释放
                <div class:hidden=move || !show_form.get()>
                    <DepartmentFormPanel
                        on_refreshed={move |list: Vec<Department>| departments.set(list)}
                        on_close={move |_: ()| show_form.set(false)}
                    />
                </div>

                <Show when=move || loading.get() && is_empty()>
                    <div class="text-center py-12">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                </Show>

                <div class="grid gap-4 md:grid-cols-2 lg:grid-cols-3">
                    <For
                        each=move || departments.get()
                        key=|dept| dept.id.clone()
                        children=move |dept| {
                            let view_id = dept.id.clone();
                            let delete_id = dept.id.clone();
                            view! {
                                <div class="card bg-base-100 shadow">
                                    <div class="card-body">
                                        <h3 class="card-title text-primary">{dept.dept_name.clone()}</h3>
                                        <p class="text-base-content/70 line-clamp-3">{dept.description.clone()}</p>
                                        <p class="text-sm text-base-content/50">
                                            "Created: " {dept.created_date()}
                                        </p>
                                        <div class="card-actions">
                                            <button
                                                class="btn btn-info btn-sm gap-1"
                                                on:click=move |_| handle_view(view_id.clone())
                                            >
                                                <Eye attr:class="h-4 w-4" /> "View"
                                            </button>
                                            <button
                                                class="btn btn-error btn-sm gap-1"
                                                on:click=move |_| handle_delete(delete_id.clone())
                                            >
                                                <Trash2 attr:class="h-4 w-4" /> "Delete"
                                            </button>
                                        </div>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>

                <Show when=move || !loading.get() && is_empty()>
                    <div class="text-center py-12">
                        <Building attr:class="mx-auto text-base-content/30 mb-4 h-16 w-16" />
                        <p class="text-lg text-base-content/60">"No departments found"</p>
                        <p class="text-base-content/50">"Add your first department to get started"</p>
                    </div>
                </Show>
            </div>

            {move || {
                selected
                    .get()
                    .map(|dept| {
                        view! { <DepartmentDetail department=dept on_close={move |_: ()| selected.set(None)} /> }
                    })
            }}
        </div>
    }
}
