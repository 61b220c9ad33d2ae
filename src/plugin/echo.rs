//! The bundled path-echo plugin.
//!
//! Registered under the name `path-echo`, it replaces the host's default
//! handler with one that answers every request with status 200 and the body
//! `Hello, "<escaped-path>"`, where the request path is HTML-escaped. When
//! the host has provided a usable logger, each request additionally emits one
//! debug entry carrying the escaped path.

use std::any::Any;
use std::sync::Arc;
use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};

use crate::http::response;
use crate::plugin::logger::PluginLogger;
use crate::plugin::{handler_fn, HandlerPlugin, HttpHandler, PluginError, PluginSettings};

/// Echoes the escaped request path back to the client.
pub struct EchoPlugin {
    /// Set at most once during registration, read-only afterwards.
    logger: OnceLock<Arc<dyn PluginLogger>>,
}

impl EchoPlugin {
    pub fn new() -> Self {
        Self {
            logger: OnceLock::new(),
        }
    }
}

impl Default for EchoPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerPlugin for EchoPlugin {
    fn name(&self) -> &'static str {
        "path-echo"
    }

    fn register_logger(&self, value: Box<dyn Any + Send + Sync>) {
        // A value that is not a logger is silently ignored: the plugin keeps
        // running without one.
        let Ok(logger) = value.downcast::<Arc<dyn PluginLogger>>() else {
            return;
        };
        let logger = *logger;
        if self.logger.set(Arc::clone(&logger)).is_ok() {
            logger.debug(&format!("[PLUGIN: {}] Logger loaded", self.name()));
        }
    }

    fn register_handler(
        &self,
        _settings: &PluginSettings,
        _next: HttpHandler,
    ) -> Result<HttpHandler, PluginError> {
        // Whether requests are logged is decided here, once, by whether a
        // logger was registered before handler installation.
        let logger = self.logger.get().cloned();
        Ok(handler_fn(move |req: Request<Body>| {
            let logger = logger.clone();
            let escaped = escape_html(req.uri().path());
            async move {
                if let Some(log) = &logger {
                    log.debug(&format!("request: {escaped}"));
                }
                response::plain_text(StatusCode::OK, format!("Hello, \"{escaped}\""))
            }
        }))
    }
}

/// HTML-escape a string the way `html.EscapeString` does: only the five
/// characters that are special in HTML text and attribute values.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Captures debug calls so tests can count them.
    #[derive(Default)]
    struct RecordingLogger {
        entries: Mutex<Vec<String>>,
    }

    impl RecordingLogger {
        fn debug_entries(&self) -> Vec<String> {
            self.entries.lock().unwrap().clone()
        }
    }

    impl PluginLogger for RecordingLogger {
        fn debug(&self, msg: &str) {
            self.entries.lock().unwrap().push(msg.to_string());
        }
        fn info(&self, _msg: &str) {}
        fn warning(&self, _msg: &str) {}
        fn error(&self, _msg: &str) {}
        fn critical(&self, _msg: &str) {}
        fn fatal(&self, _msg: &str) {}
    }

    fn install(plugin: &EchoPlugin) -> HttpHandler {
        plugin
            .register_handler(&PluginSettings::new(), response::default_handler())
            .unwrap()
    }

    async fn body_for(handler: HttpHandler, path: &str) -> (StatusCode, String) {
        let req = Request::builder().uri(path).body(Body::empty()).unwrap();
        let resp = handler.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn escape_html_handles_all_special_chars() {
        assert_eq!(escape_html("/plain/path"), "/plain/path");
        assert_eq!(
            escape_html("</script>"),
            "&lt;/script&gt;"
        );
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html(r#"x"y'z"#), "x&#34;y&#39;z");
        // Ampersand is escaped once, not recursively.
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[tokio::test]
    async fn echoes_escaped_path() {
        let plugin = EchoPlugin::new();
        let (status, body) = body_for(install(&plugin), "/hello/world").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"Hello, "/hello/world""#);
    }

    #[tokio::test]
    async fn escapes_ampersand_and_quote_in_path() {
        let plugin = EchoPlugin::new();
        let (_, body) = body_for(install(&plugin), "/a&b'c").await;
        assert_eq!(body, r#"Hello, "/a&amp;b&#39;c""#);
    }

    #[tokio::test]
    async fn non_logger_value_is_ignored_without_panic() {
        let plugin = EchoPlugin::new();
        plugin.register_logger(Box::new(42u32));
        plugin.register_logger(Box::new(String::from("not a logger")));

        // Plugin still serves requests, and nothing gets logged.
        let (status, body) = body_for(install(&plugin), "/x").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"Hello, "/x""#);
    }

    #[tokio::test]
    async fn registered_logger_sees_one_debug_per_request() {
        let recorder = Arc::new(RecordingLogger::default());
        let logger: Arc<dyn PluginLogger> = recorder.clone();

        let plugin = EchoPlugin::new();
        plugin.register_logger(Box::new(logger));
        assert_eq!(
            recorder.debug_entries(),
            vec!["[PLUGIN: path-echo] Logger loaded".to_string()]
        );

        let handler = install(&plugin);
        let _ = body_for(handler.clone(), "/one").await;
        let _ = body_for(handler, "/two&three").await;

        let entries = recorder.debug_entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1], "request: /one");
        assert_eq!(entries[2], "request: /two&amp;three");
    }

    #[tokio::test]
    async fn logger_registered_after_handler_is_not_used() {
        let recorder = Arc::new(RecordingLogger::default());
        let logger: Arc<dyn PluginLogger> = recorder.clone();

        let plugin = EchoPlugin::new();
        let handler = install(&plugin);
        plugin.register_logger(Box::new(logger));

        let _ = body_for(handler, "/late").await;
        // Only the registration message, no per-request entry.
        assert_eq!(recorder.debug_entries().len(), 1);
    }
}
