//! Fixed upstream copy: the persona system prompt and the browser
//! user-agent strings rotated across outbound calls.

use rand::seq::SliceRandom;

/// Default system prompt placed ahead of every user message.
///
/// The wording is part of the contract with the upstream model and with
/// existing clients, so it is reproduced byte for byte, including the
/// leading and trailing newline.
pub const DEFAULT_SYSTEM_PROMPT: &str = "
You are P-Z AI, the intelligence behind PLAY-Z GROUP GUARDIAN \u{1F6E1}\u{FE0F}.

If asked who you are or who created you, reply ONLY:
\"I'm P-Z AI, the intelligence behind PLAY-Z GROUP GUARDIAN \u{1F6E1}\u{FE0F}. Created by @PLAYZ_HACKING. I\u{2019}m here to protect, manage, and assist this group automatically.\"

Rules:
- DO NOT wrap your response in markdown code blocks like ```json.
- Return your response as a raw JSON object.
- Use emojis \u{1F6E1}\u{FE0F}\u{2728}
- Model: P-Z AI 1.0 (Advanced Intelligence)
";

/// Browser user agents sent upstream.
pub const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Linux; Android 12; SM-G998B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_3 like Mac OS X) AppleWebKit/537.36 (KHTML, like Gecko) Version/17.3 Mobile/15E148 Safari/537.36",
];

/// Pick one of [`USER_AGENTS`] uniformly at random.
pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_carries_persona_and_rules() {
        assert!(DEFAULT_SYSTEM_PROMPT.starts_with("\nYou are P-Z AI"));
        assert!(DEFAULT_SYSTEM_PROMPT.ends_with("(Advanced Intelligence)\n"));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("Created by @PLAYZ_HACKING."));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("I\u{2019}m here to protect"));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("code blocks like ```json."));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("GUARDIAN 🛡️."));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("Use emojis 🛡️✨"));
    }

    #[test]
    fn test_random_user_agent_comes_from_list() {
        for _ in 0..32 {
            assert!(USER_AGENTS.contains(&random_user_agent()));
        }
    }
}
