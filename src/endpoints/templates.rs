use crate::{Client, RequestSpec, Result};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct PreviewBody<'a, T: ?Sized> {
    substitution_data: &'a T,
}

/// `/templates`: stored message content, in draft and published versions.
#[derive(Debug, Clone, Copy)]
pub struct Templates<'a> {
    client: &'a Client,
}

impl<'a> Templates<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List the most recent version of each template.
    pub async fn list(&self) -> Result<Value> {
        self.client.call(RequestSpec::get("templates")).await
    }

    /// Create a template. `name` and `content` (with `from`, `subject` and
    /// `html` or `text`) are required by the API.
    pub async fn create<T: Serialize + ?Sized>(&self, values: &T) -> Result<Value> {
        self.client
            .call(RequestSpec::post("templates").json_body(values)?)
            .await
    }

    /// Retrieve a template.
    ///
    /// # Arguments
    /// * `draft` - `Some(true)` for the latest draft, `Some(false)` for the
    ///   latest published version, `None` for the latest of either
    pub async fn retrieve(&self, id: &str, draft: Option<bool>) -> Result<Value> {
        let spec = RequestSpec::get(self.path(id)).query_opt("draft", draft);
        self.client.call(spec).await
    }

    /// Update a template. With `update_published` the published version is
    /// overwritten directly; otherwise a new draft is created. The API answers
    /// `404` when overwriting a template that was never published.
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        id: &str,
        values: &T,
        update_published: bool,
    ) -> Result<Value> {
        let spec = RequestSpec::put(self.path(id))
            .json_body(values)?
            .query("update_published", update_published);
        self.client.call(spec).await
    }

    /// Render a template with `substitution_data`, without sending it.
    ///
    /// # Examples
    /// ```no_run
    /// # use simple_spark::Client;
    /// # use serde_json::json;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), simple_spark::Error> {
    /// let client = Client::new("my-api-key")?;
    /// let rendered = client
    ///     .templates()
    ///     .preview("summer-sale", &json!({"name": "Natalie", "member": true}), Some(true))
    ///     .await?;
    /// println!("{}", rendered["html"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn preview<T: Serialize + ?Sized>(
        &self,
        id: &str,
        substitution_data: &T,
        draft: Option<bool>,
    ) -> Result<Value> {
        let path = format!("{}/preview", self.path(id));
        let spec = RequestSpec::post(path)
            .json_body(&PreviewBody { substitution_data })?
            .query_opt("draft", draft);
        self.client.call(spec).await
    }

    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client.call(RequestSpec::delete(self.path(id))).await
    }

    fn path(&self, id: &str) -> String {
        format!("templates/{}", self.client.url_encode(id))
    }
}
