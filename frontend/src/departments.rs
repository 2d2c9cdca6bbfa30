//! 部门列表页的业务流程
//!
//! 所有变更之后都重新拉取完整列表，不做乐观更新或局部合并。

use deptdesk_shared::{Department, DepartmentForm};
use deptdesk_shared::protocol::{
    CreateDepartmentRequest, DeleteDepartmentRequest, GetDepartmentRequest, ListDepartmentsRequest,
};

use crate::api::{ApiClient, ApiError};
use crate::phase::{PhaseSlot, SubmitError, submit};
use crate::request::HttpClient;

#[cfg(test)]
mod tests;

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this department?";

/// 删除前的用户确认
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// 变更成功后重新拉取列表的结果
#[derive(Debug)]
pub enum Refresh {
    Loaded(Vec<Department>),
    /// 变更已生效，但重新拉取失败；界面保留旧列表
    Failed(ApiError),
}

#[derive(Debug)]
pub enum DeleteOutcome {
    /// 用户取消，未发出任何请求
    Cancelled,
    Deleted(Refresh),
}

#[derive(Clone)]
pub struct DepartmentService<C> {
    api: ApiClient<C>,
}

impl<C: HttpClient> DepartmentService<C> {
    pub fn new(api: ApiClient<C>) -> Self {
        Self { api }
    }

    /// 拉取完整列表
    pub async fn list(&self) -> Result<Vec<Department>, ApiError> {
        self.api
            .call(&ListDepartmentsRequest)
            .await
            .map(|list| list.into_vec())
            .inspect_err(|e| log::error!("error fetching departments: {}", e))
    }

    /// 创建部门，然后重新拉取列表
    pub async fn create(&self, req: &CreateDepartmentRequest) -> Result<Refresh, ApiError> {
        self.api
            .call(req)
            .await
            .inspect_err(|e| log::error!("error adding department: {}", e))?;
        log::info!("department {} created", req.dept_name);
        Ok(self.refresh().await)
    }

    /// 新增表单提交：校验失败或正在提交时不发请求
    pub async fn submit_create(
        &self,
        form: &DepartmentForm,
        phase: &impl PhaseSlot,
    ) -> Result<Refresh, SubmitError> {
        submit(phase, form.validate(), |req| async move { self.create(&req).await }).await
    }

    /// 经用户确认后删除部门，然后重新拉取列表
    pub async fn delete(&self, id: &str, confirm: &impl Confirm) -> Result<DeleteOutcome, ApiError> {
        if !confirm.confirm(DELETE_CONFIRMATION) {
            return Ok(DeleteOutcome::Cancelled);
        }
        let req = DeleteDepartmentRequest { id: id.to_string() };
        self.api
            .call(&req)
            .await
            .inspect_err(|e| log::error!("error deleting department {}: {}", id, e))?;
        log::info!("department {} deleted", id);
        Ok(DeleteOutcome::Deleted(self.refresh().await))
    }

    /// 拉取单个部门（用于详情弹窗，与列表互不影响）
    pub async fn get(&self, id: &str) -> Result<Department, ApiError> {
        let req = GetDepartmentRequest { id: id.to_string() };
        self.api
            .call(&req)
            .await
            .map(|detail| detail.into_department())
            .inspect_err(|e| log::error!("error fetching department {}: {}", id, e))
    }

    async fn refresh(&self) -> Refresh {
        match self.list().await {
            Ok(list) => Refresh::Loaded(list),
            Err(e) => Refresh::Failed(e),
        }
    }
}
