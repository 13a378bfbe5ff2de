use crate::error::DrmidResult;
use crate::model::ApiLevel;

pub trait PlatformInfo {
    fn api_level(&self) -> DrmidResult<ApiLevel>;
}
