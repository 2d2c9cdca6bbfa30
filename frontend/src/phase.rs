//! 表单提交状态机
//!
//! `Idle -> Submitting -> (Succeeded | Failed)`。
//! 结束状态与 `Idle` 一样可以再次提交；提交中拒绝新的提交，
//! 界面据此禁用提交按钮。

use std::cell::RefCell;
use std::future::Future;

use deptdesk_shared::FormErrors;
use leptos::prelude::*;

use crate::api::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    /// 携带面向用户的错误描述
    Failed(String),
}

impl SubmitPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitPhase::Submitting)
    }

    /// 进入提交中；已经在提交时返回 `false`
    pub fn begin(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        *self = SubmitPhase::Submitting;
        true
    }

    pub fn succeed(&mut self) {
        *self = SubmitPhase::Succeeded;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        *self = SubmitPhase::Failed(message.into());
    }

    pub fn reset(&mut self) {
        *self = SubmitPhase::Idle;
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmitPhase::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// 持有提交状态的位置：界面中是信号，测试中是 `RefCell`
///
/// 所在组件已卸载时返回 `None`。
pub trait PhaseSlot {
    fn update_phase<U>(&self, f: impl FnOnce(&mut SubmitPhase) -> U) -> Option<U>;
}

impl PhaseSlot for RwSignal<SubmitPhase> {
    fn update_phase<U>(&self, f: impl FnOnce(&mut SubmitPhase) -> U) -> Option<U> {
        self.try_update(f)
    }
}

impl PhaseSlot for RefCell<SubmitPhase> {
    fn update_phase<U>(&self, f: impl FnOnce(&mut SubmitPhase) -> U) -> Option<U> {
        Some(f(&mut self.borrow_mut()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// 校验未通过，未发出请求，状态保持不变
    #[error("form has invalid fields")]
    Invalid(FormErrors),
    /// 上一次提交尚未结束
    #[error("a submission is already in progress")]
    Busy,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// 一次表单提交：校验 -> 进入提交中 -> 调用后端 -> 结束
///
/// 只有校验通过且当前不在提交中时才会调用 `call`。
pub async fn submit<R, T, F, Fut>(
    phase: &impl PhaseSlot,
    validated: Result<R, FormErrors>,
    call: F,
) -> Result<T, SubmitError>
where
    F: FnOnce(R) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let req = validated.map_err(SubmitError::Invalid)?;
    if phase.update_phase(SubmitPhase::begin) != Some(true) {
        return Err(SubmitError::Busy);
    }

    match call(req).await {
        Ok(value) => {
            phase.update_phase(SubmitPhase::succeed);
            Ok(value)
        }
        Err(e) => {
            let message = e.user_message();
            phase.update_phase(|p| p.fail(message));
            Err(SubmitError::Api(e))
        }
    }
}
