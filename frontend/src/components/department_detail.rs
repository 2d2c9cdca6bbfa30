//! 部门详情弹窗

use deptdesk_shared::Department;
use leptos::prelude::*;

#[component]
pub fn DepartmentDetail(department: Department, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let created = department.created_timestamp();

    view! {
        <div class="modal modal-open">
            <div class="modal-box">
                <h2 class="text-2xl font-bold mb-4 text-primary">{department.dept_name}</h2>
                <div class="space-y-3">
                    <div>
                        <label class="text-sm font-semibold text-base-content/60">"Description:"</label>
                        <p>{department.description}</p>
                    </div>
                    <div>
                        <label class="text-sm font-semibold text-base-content/60">"Created At:"</label>
                        <p>{created}</p>
                    </div>
                    <div>
                        <label class="text-sm font-semibold text-base-content/60">"Department ID:"</label>
                        <p class="font-mono text-sm">{department.id}</p>
                    </div>
                </div>
                <div class="modal-action">
                    <button class="btn btn-primary w-full" on:click=move |_| on_close.run(())>
                        "Close"
                    </button>
                </div>
            </div>
        </div>
    }
}
