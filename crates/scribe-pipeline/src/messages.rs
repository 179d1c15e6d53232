//! User-facing failure messages, one per failure kind

use scribe_core::{ErrorKind, Failure};

pub fn invalid_credential_format() -> Failure {
    Failure::new(ErrorKind::InvalidCredential, "请输入有效的 Kimi API 密钥（以 sk- 开头）！")
}

/// The endpoint rejected the key.
pub fn credential_rejected() -> Failure {
    Failure::new(ErrorKind::InvalidCredential, "Kimi API密钥无效或已过期！")
}

pub fn client_init_failure(detail: impl std::fmt::Display) -> Failure {
    Failure::new(ErrorKind::ClientInitFailure, format!("客户端初始化失败：{}", detail))
}

pub fn unknown_template() -> Failure {
    Failure::new(ErrorKind::UnknownTemplate, "模板类型错误，无此生成模板！")
}

/// `names` go into the kind, `labels` into the message. Both in registry order.
pub fn invalid_parameters(names: Vec<String>, labels: &[String]) -> Failure {
    let message = format!("缺少或无效参数：{}（请填写有效且非空的内容）", labels.join(", "));
    Failure::new(ErrorKind::InvalidParameters(names), message)
}

pub fn template_render_error(detail: impl std::fmt::Display) -> Failure {
    Failure::new(ErrorKind::TemplateRenderError, format!("模板渲染失败：{}", detail))
}

pub fn quota_exceeded() -> Failure {
    Failure::new(ErrorKind::QuotaExceeded, "Kimi账户余额不足，请充值！")
}

pub fn rate_limited() -> Failure {
    Failure::new(ErrorKind::RateLimited, "请求频率过高，请稍后再试！")
}

/// Unclassified failure; `raw` is kept verbatim.
pub fn remote_error(raw: impl std::fmt::Display) -> Failure {
    Failure::new(ErrorKind::RemoteError, format!("生成失败：{}", raw))
}
