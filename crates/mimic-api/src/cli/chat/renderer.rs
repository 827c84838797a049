//! Reply presentation for the console adapter.

use mimic_types::message::{Reply, ReplySource};

/// Wrap reply text in a `console` code block.
pub fn render_reply(text: &str) -> String {
    format!("```console\n{text}\n```")
}

/// Short tag telling the user where a reply came from.
pub fn source_label(source: ReplySource) -> &'static str {
    match source {
        ReplySource::Command => "command",
        ReplySource::Memory => "memory",
        ReplySource::Generated => "generated",
        ReplySource::Fallback => "error",
    }
}

/// Full block printed for one reply, optionally tagged with its source.
pub fn render(reply: &Reply, show_source: bool) -> String {
    let block = render_reply(&reply.text);
    if show_source {
        format!("{block}\n({})", source_label(reply.source))
    } else {
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_is_fenced() {
        assert_eq!(render_reply("hi there"), "```console\nhi there\n```");
    }

    #[test]
    fn test_source_tag_is_optional() {
        let reply = Reply {
            channel_id: "general".into(),
            text: "hi".into(),
            source: ReplySource::Memory,
        };
        assert_eq!(render(&reply, false), "```console\nhi\n```");
        assert!(render(&reply, true).ends_with("(memory)"));
    }
}
