//! 웹훅 공유 시크릿 검증.

use secrecy::{ExposeSecret, SecretString};

/// 시크릿을 담는 요청 헤더 이름 (대소문자 무관).
pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

/// 허용된 웹훅 시크릿 집합.
///
/// `WEBHOOK_SECRETS`(쉼표 구분)와 `WEBHOOK_SECRET`(단일)을 합쳐 중복 없이 보관합니다.
#[derive(Debug, Default)]
pub struct AllowedSecrets {
    secrets: Vec<SecretString>,
}

impl AllowedSecrets {
    /// 단일 시크릿 설정과 쉼표 구분 시크릿 목록으로 집합을 만듭니다.
    ///
    /// 목록의 각 항목은 앞뒤 공백을 제거하고 빈 항목은 버립니다.
    pub fn from_settings(single: Option<&str>, multi: Option<&str>) -> Self {
        let mut values: Vec<&str> = multi
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        if let Some(single) = single.filter(|s| !s.is_empty()) {
            values.push(single);
        }

        let mut deduped: Vec<&str> = Vec::with_capacity(values.len());
        for value in values {
            if !deduped.contains(&value) {
                deduped.push(value);
            }
        }

        Self {
            secrets: deduped
                .into_iter()
                .map(|s| SecretString::from(s.to_owned()))
                .collect(),
        }
    }

    /// 설정된 시크릿 수.
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// 설정된 시크릿이 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// 요청 시크릿을 검증합니다.
    ///
    /// 설정이 비어 있거나, 헤더가 없거나 비어 있으면 항상 거부합니다.
    pub fn verify(&self, presented: Option<&str>) -> bool {
        let Some(presented) = presented.filter(|s| !s.is_empty()) else {
            return false;
        };

        self.secrets
            .iter()
            .any(|secret| secret.expose_secret() == presented)
    }
}
