use std::sync::Arc;

use serde_json::Value;

use crate::error::ConnectorError;
use crate::host::{ExecutionContext, ExecutionItem, HttpHelper, HttpRequest, InputItem};
use crate::request::build_request;

/// The connector node proper: exactly one outbound request per input item,
/// processed sequentially in input order.
pub struct FractalForgeNode {
    helper: Arc<dyn HttpHelper>,
}

impl FractalForgeNode {
    pub fn new(helper: Arc<dyn HttpHelper>) -> Self {
        Self { helper }
    }

    pub async fn execute(
        &self,
        ctx: &ExecutionContext,
        items: &[InputItem],
    ) -> Result<Vec<ExecutionItem>, ConnectorError> {
        let mut return_data = Vec::new();

        for (i, item) in items.iter().enumerate() {
            match self.run_item(ctx, item, i).await {
                Ok(mut shaped) => return_data.append(&mut shaped),
                Err(err) => {
                    if ctx.continue_on_fail {
                        tracing::warn!(item = i, error = %err, "item failed, continuing");
                        return_data.push(ExecutionItem::failure(err.to_string(), i));
                        continue;
                    }
                    return Err(err);
                }
            }
        }

        Ok(return_data)
    }

    async fn run_item(
        &self,
        ctx: &ExecutionContext,
        item: &InputItem,
        index: usize,
    ) -> Result<Vec<ExecutionItem>, ConnectorError> {
        let descriptor = build_request(&item.params, index)?;

        let request = HttpRequest {
            method: descriptor.method,
            uri: format!("{}/{}", ctx.credentials.base_url(), descriptor.endpoint),
            headers: vec![ctx.credentials.bearer_header()],
            qs: descriptor.qs,
            body: descriptor.body,
        };
        tracing::debug!(method = %request.method, uri = %request.uri, "sending Fractal Forge request");

        let response = self.helper.request(request).await?;
        Ok(shape_response(response, index))
    }
}

/// Backend responses are expected to be arrays of objects; anything else is
/// wrapped as a single item rather than guessed at.
fn shape_response(response: Value, source_index: usize) -> Vec<ExecutionItem> {
    match response {
        Value::Array(values) => values
            .into_iter()
            .map(|v| ExecutionItem::success(v, source_index))
            .collect(),
        other => vec![ExecutionItem::success(other, source_index)],
    }
}
