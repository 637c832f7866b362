//! Typed facade over the shell's command channel.
//!
//! Each method maps to exactly one backend command with a fixed argument
//! record. Nothing is validated, cached or retried here: a rejected command
//! surfaces the backend's error value untouched, and callers decide how to
//! present it.
//!
//! The channel itself is injected through [`Invoke`]; in the browser that is
//! the shell's invoke function, in tests a scripted fake.

use crate::types::{ChapterImages, Format, LikedManga, Manga, SearchItem};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Backend commands in declaration order. Names are a versioned contract
/// with the native side.
pub const BRIDGE_COMMAND_NAMES: &[&str] = &[
    "get_connectors",
    "search_manga",
    "fetch_manga",
    "fetch_chapter",
    "toggle_liked",
    "is_liked",
    "fetch_liked",
    "set_manga_view",
    "get_manga_view",
    "mark_chapter_read",
];

/// Generic asynchronous command call: resolves with the command's JSON
/// result or rejects with the backend's JSON error value.
#[async_trait(?Send)]
pub trait Invoke {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, Value>;
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("backend rejected `{command}`: {error}")]
    Rejected { command: &'static str, error: Value },
    #[error("unexpected reply from `{command}`: {source}")]
    Decode {
        command: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode arguments for `{command}`: {source}")]
    Encode {
        command: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl BridgeError {
    pub fn command(&self) -> &'static str {
        match self {
            BridgeError::Rejected { command, .. }
            | BridgeError::Decode { command, .. }
            | BridgeError::Encode { command, .. } => *command,
        }
    }

    /// The backend's own error value, when the command was rejected.
    pub fn backend_error(&self) -> Option<&Value> {
        match self {
            BridgeError::Rejected { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct NoArgs {}

#[derive(Serialize)]
struct SearchArgs<'a> {
    idx: u32,
    query: &'a str,
}

#[derive(Serialize)]
struct ItemArgs<'a> {
    idx: u32,
    id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToggleLikedArgs<'a> {
    connector_idx: u32,
    id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MangaRefArgs<'a> {
    connector_idx: u32,
    manga_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MangaViewArgs<'a> {
    connector_idx: u32,
    manga_id: &'a str,
    long: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChapterReadArgs<'a> {
    connector_idx: u32,
    chapter_id: &'a str,
}

pub struct Backend<I> {
    invoker: I,
}

impl<I: Invoke> Backend<I> {
    pub fn new(invoker: I) -> Self {
        Self { invoker }
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    async fn call<A, T>(&self, command: &'static str, args: &A) -> Result<T, BridgeError>
    where
        A: Serialize,
        T: DeserializeOwned,
    {
        let args = serde_json::to_value(args)
            .map_err(|source| BridgeError::Encode { command, source })?;
        debug!(command, "invoking backend command");
        let reply = self.invoker.invoke(command, args).await.map_err(|error| {
            warn!(command, %error, "backend command rejected");
            BridgeError::Rejected { command, error }
        })?;
        serde_json::from_value(reply).map_err(|source| BridgeError::Decode { command, source })
    }

    pub async fn get_connectors(&self) -> Result<Vec<String>, BridgeError> {
        self.call("get_connectors", &NoArgs {}).await
    }

    pub async fn search_manga(&self, idx: u32, query: &str) -> Result<Vec<SearchItem>, BridgeError> {
        self.call("search_manga", &SearchArgs { idx, query }).await
    }

    pub async fn fetch_manga(&self, idx: u32, id: &str) -> Result<Manga, BridgeError> {
        self.call("fetch_manga", &ItemArgs { idx, id }).await
    }

    pub async fn fetch_chapter(&self, idx: u32, id: &str) -> Result<ChapterImages, BridgeError> {
        self.call("fetch_chapter", &ItemArgs { idx, id }).await
    }

    /// Flip the liked flag; resolves with the new value.
    pub async fn toggle_liked(&self, connector_idx: u32, id: &str) -> Result<bool, BridgeError> {
        self.call("toggle_liked", &ToggleLikedArgs { connector_idx, id })
            .await
    }

    pub async fn is_liked(&self, connector_idx: u32, manga_id: &str) -> Result<bool, BridgeError> {
        self.call(
            "is_liked",
            &MangaRefArgs {
                connector_idx,
                manga_id,
            },
        )
        .await
    }

    pub async fn fetch_liked(&self) -> Result<Vec<LikedManga>, BridgeError> {
        self.call("fetch_liked", &NoArgs {}).await
    }

    /// Persist the view format; `long` selects the continuous strip.
    pub async fn set_manga_view(
        &self,
        connector_idx: u32,
        manga_id: &str,
        long: bool,
    ) -> Result<(), BridgeError> {
        self.call(
            "set_manga_view",
            &MangaViewArgs {
                connector_idx,
                manga_id,
                long,
            },
        )
        .await
    }

    pub async fn get_manga_view(
        &self,
        connector_idx: u32,
        manga_id: &str,
    ) -> Result<Option<Format>, BridgeError> {
        self.call(
            "get_manga_view",
            &MangaRefArgs {
                connector_idx,
                manga_id,
            },
        )
        .await
    }

    pub async fn mark_chapter_read(
        &self,
        connector_idx: u32,
        chapter_id: &str,
    ) -> Result<(), BridgeError> {
        self.call(
            "mark_chapter_read",
            &ChapterReadArgs {
                connector_idx,
                chapter_id,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct ScriptedInvoke {
        replies: HashMap<&'static str, Result<Value, Value>>,
        calls: RefCell<Vec<(String, Value)>>,
    }

    impl ScriptedInvoke {
        fn reply(mut self, command: &'static str, reply: Result<Value, Value>) -> Self {
            self.replies.insert(command, reply);
            self
        }

        fn calls(&self) -> Vec<(String, Value)> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl Invoke for ScriptedInvoke {
        async fn invoke(&self, command: &str, args: Value) -> Result<Value, Value> {
            self.calls.borrow_mut().push((command.to_string(), args));
            self.replies
                .get(command)
                .cloned()
                .unwrap_or_else(|| Err(json!(format!("no script for {command}"))))
        }
    }

    fn manga_json(id: &str) -> Value {
        json!({
            "desc": {"id": id, "title": "Blame!", "description": "", "cover_url": "cover.jpg"},
            "chapters": [
                {"id": "c2", "name": "Vol.1 Chap.2", "number": 2.0, "read": true},
                {"id": "c1", "name": "Vol.1 Chap.1", "number": 1.0, "read": null}
            ]
        })
    }

    #[test]
    fn bridge_command_surface_remains_stable() {
        assert_eq!(BRIDGE_COMMAND_NAMES.len(), 10);
        assert_eq!(BRIDGE_COMMAND_NAMES[0], "get_connectors");
        assert_eq!(
            BRIDGE_COMMAND_NAMES[BRIDGE_COMMAND_NAMES.len() - 1],
            "mark_chapter_read"
        );
    }

    #[tokio::test]
    async fn every_method_sends_its_contract_arguments() {
        let backend = Backend::new(
            ScriptedInvoke::default()
                .reply("get_connectors", Ok(json!(["MangaDex", "MangaKakalot"])))
                .reply("search_manga", Ok(json!([])))
                .reply("fetch_manga", Ok(manga_json("m1")))
                .reply("fetch_chapter", Ok(json!({"images": ["a.png"], "format": "Long"})))
                .reply("toggle_liked", Ok(json!(true)))
                .reply("is_liked", Ok(json!(false)))
                .reply("fetch_liked", Ok(json!([[0, manga_json("m1")]])))
                .reply("set_manga_view", Ok(Value::Null))
                .reply("get_manga_view", Ok(Value::Null))
                .reply("mark_chapter_read", Ok(Value::Null)),
        );

        backend.get_connectors().await.expect("connectors");
        backend.search_manga(1, "knights").await.expect("search");
        backend.fetch_manga(1, "m1").await.expect("manga");
        backend.fetch_chapter(1, "c1").await.expect("chapter");
        backend.toggle_liked(1, "m1").await.expect("toggle");
        backend.is_liked(1, "m1").await.expect("liked");
        backend.fetch_liked().await.expect("liked list");
        backend.set_manga_view(1, "m1", true).await.expect("set view");
        backend.get_manga_view(1, "m1").await.expect("get view");
        backend.mark_chapter_read(1, "c1").await.expect("read");

        let calls = backend.invoker().calls();
        let names: Vec<&str> = calls.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, BRIDGE_COMMAND_NAMES);

        let args: Vec<&Value> = calls.iter().map(|(_, args)| args).collect();
        assert_eq!(args[0], &json!({}));
        assert_eq!(args[1], &json!({"idx": 1, "query": "knights"}));
        assert_eq!(args[2], &json!({"idx": 1, "id": "m1"}));
        assert_eq!(args[3], &json!({"idx": 1, "id": "c1"}));
        assert_eq!(args[4], &json!({"connectorIdx": 1, "id": "m1"}));
        assert_eq!(args[5], &json!({"connectorIdx": 1, "mangaId": "m1"}));
        assert_eq!(args[6], &json!({}));
        assert_eq!(
            args[7],
            &json!({"connectorIdx": 1, "mangaId": "m1", "long": true})
        );
        assert_eq!(args[8], &json!({"connectorIdx": 1, "mangaId": "m1"}));
        assert_eq!(args[9], &json!({"connectorIdx": 1, "chapterId": "c1"}));
    }

    #[tokio::test]
    async fn results_decode_into_contract_shapes() {
        let backend = Backend::new(
            ScriptedInvoke::default()
                .reply("fetch_manga", Ok(manga_json("m9")))
                .reply("fetch_chapter", Ok(json!({"images": ["1.jpg", "2.jpg"], "format": "Normal"})))
                .reply("get_manga_view", Ok(json!("Long")))
                .reply("fetch_liked", Ok(json!([[2, manga_json("m9")]]))),
        );

        let manga = backend.fetch_manga(0, "m9").await.expect("manga");
        assert_eq!(manga.desc.id, "m9");
        assert_eq!(manga.chapters[0].read, Some(true));
        assert_eq!(manga.chapters[1].read, None);

        let chapter = backend.fetch_chapter(0, "c1").await.expect("chapter");
        assert_eq!(chapter.images.len(), 2);
        assert_eq!(chapter.format, Format::Normal);

        assert_eq!(
            backend.get_manga_view(0, "m9").await.expect("view"),
            Some(Format::Long)
        );

        let liked = backend.fetch_liked().await.expect("liked");
        assert_eq!(liked[0].0, 2);
        assert_eq!(liked[0].1.desc.title, "Blame!");
    }

    #[tokio::test]
    async fn absent_view_format_decodes_as_none() {
        let backend =
            Backend::new(ScriptedInvoke::default().reply("get_manga_view", Ok(Value::Null)));
        assert_eq!(backend.get_manga_view(0, "m1").await.expect("view"), None);
    }

    #[tokio::test]
    async fn rejections_pass_the_backend_error_through() {
        let backend = Backend::new(
            ScriptedInvoke::default().reply("search_manga", Err(json!("error sending request"))),
        );

        let err = backend
            .search_manga(0, "x")
            .await
            .expect_err("search should fail");
        assert_eq!(err.command(), "search_manga");
        assert_eq!(err.backend_error(), Some(&json!("error sending request")));
        assert_eq!(backend.invoker().calls().len(), 1);
    }

    #[tokio::test]
    async fn mismatched_replies_are_decode_errors() {
        let backend =
            Backend::new(ScriptedInvoke::default().reply("toggle_liked", Ok(json!("yes"))));

        let err = backend.toggle_liked(0, "m1").await.expect_err("bad shape");
        assert!(matches!(err, BridgeError::Decode { command: "toggle_liked", .. }));
        assert!(err.backend_error().is_none());
    }
}
