//! Serde helpers for payload deserialization

use serde::{Deserialize, Deserializer};

/// Deserialize a field into `Some(inner)` so that an absent field stays `None`.
///
/// 与 `#[serde(default)]` 配合得到三态字段：缺省 / 显式 null / 有值。
/// 部分更新语义依赖这个区分：缺省不改，显式 null 清空可空列。
///
/// ```ignore
/// #[serde(default, deserialize_with = "serde_helpers::double_option")]
/// pub description: Option<Option<String>>,
/// ```
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub fn default_true() -> bool {
    true
}
