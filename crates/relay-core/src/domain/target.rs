//! 알림 유형별 텔레그램 전송 대상.

use secrecy::SecretString;

/// 텔레그램 봇 설정 한 벌 (환경 변수 이름 포함).
#[derive(Debug)]
pub struct TelegramTarget {
    /// 봇 토큰
    pub bot_token: Option<SecretString>,
    /// 채팅 ID
    pub chat_id: Option<String>,
    /// 봇 토큰 환경 변수 이름
    pub token_var: &'static str,
    /// 채팅 ID 환경 변수 이름
    pub chat_var: &'static str,
}

/// 실제 전송에 사용되는 (토큰, 채팅 ID) 쌍.
#[derive(Debug, Clone, Copy)]
pub struct DispatchTarget<'a> {
    /// 봇 토큰
    pub bot_token: &'a SecretString,
    /// 채팅 ID
    pub chat_id: &'a str,
}

impl TelegramTarget {
    /// 설정값으로 대상을 만듭니다. 빈 문자열은 미설정으로 취급합니다.
    pub fn new(
        bot_token: Option<String>,
        chat_id: Option<String>,
        token_var: &'static str,
        chat_var: &'static str,
    ) -> Self {
        Self {
            bot_token: bot_token
                .filter(|s| !s.is_empty())
                .map(SecretString::from),
            chat_id: chat_id.filter(|s| !s.is_empty()),
            token_var,
            chat_var,
        }
    }

    /// 토큰과 채팅 ID가 모두 설정되었는지 확인합니다.
    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }

    /// 전송 대상을 반환합니다.
    ///
    /// # Errors
    /// 누락된 환경 변수 이름 목록 (토큰, 채팅 ID 순).
    pub fn resolve(&self) -> Result<DispatchTarget<'_>, Vec<&'static str>> {
        match (&self.bot_token, &self.chat_id) {
            (Some(bot_token), Some(chat_id)) => Ok(DispatchTarget { bot_token, chat_id }),
            (token, chat) => {
                let mut missing = Vec::with_capacity(2);
                if token.is_none() {
                    missing.push(self.token_var);
                }
                if chat.is_none() {
                    missing.push(self.chat_var);
                }
                Err(missing)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_resolve_configured() {
        let target = TelegramTarget::new(
            Some("123:abc".into()),
            Some("-100".into()),
            "TELEGRAM_BOT_TOKEN",
            "TELEGRAM_CHAT_ID",
        );
        let resolved = target.resolve().unwrap();
        assert_eq!(resolved.bot_token.expose_secret(), "123:abc");
        assert_eq!(resolved.chat_id, "-100");
        assert!(target.is_configured());
    }

    #[test]
    fn test_resolve_reports_missing_in_order() {
        let target = TelegramTarget::new(None, Some(String::new()), "TOKEN1", "CHAT1");
        assert_eq!(target.resolve().unwrap_err(), vec!["TOKEN1", "CHAT1"]);

        let target = TelegramTarget::new(Some("t".into()), None, "TOKEN1", "CHAT1");
        assert_eq!(target.resolve().unwrap_err(), vec!["CHAT1"]);
        assert!(!target.is_configured());
    }
}
