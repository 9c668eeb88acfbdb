use crate::error::ManagementResult;
use crate::models::ListResponse;
use crate::pipeline::{HttpPipeline, ManagementRequest};
use futures_util::stream::{self, Stream};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

/// Lazily walks the pages of a list operation.
///
/// The first request is the one built by the operation group; later pages
/// come from the absolute `nextLink` the service returns.
///
/// ```no_run
/// # async fn run(client: sbmgmt::ServiceBusManagementClient) -> sbmgmt::ManagementResult<()> {
/// let mut pager = client.queues().list_by_namespace("rg", "ns", None, None)?;
/// while let Some(page) = pager.next_page().await? {
///     for queue in page.value {
///         println!("{:?}", queue.name);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct Pager<T> {
    pipeline: Arc<HttpPipeline>,
    operation: String,
    next: Option<ManagementRequest>,
    _item: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for Pager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("operation", &self.operation)
            .field("exhausted", &self.next.is_none())
            .finish()
    }
}

impl<T: DeserializeOwned> Pager<T> {
    pub(crate) fn new(pipeline: Arc<HttpPipeline>, first: ManagementRequest) -> Self {
        Self {
            pipeline,
            operation: first.operation().to_string(),
            next: Some(first),
            _item: PhantomData,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    /// Fetches the next page, or `None` once the last page has been returned.
    pub async fn next_page(&mut self) -> ManagementResult<Option<ListResponse<T>>> {
        let Some(request) = self.next.take() else {
            return Ok(None);
        };

        let response = self.pipeline.send(&request).await?;
        let page: ListResponse<T> = response.json(&self.operation)?;

        self.next = page
            .next_link
            .as_deref()
            .filter(|link| !link.is_empty())
            .map(|link| ManagementRequest::get_url(self.operation.clone(), link));

        log::debug!(
            "{} returned {} item(s), more pages: {}",
            self.operation,
            page.value.len(),
            self.next.is_some()
        );

        Ok(Some(page))
    }

    /// Reads every remaining page.
    pub async fn collect_all(mut self) -> ManagementResult<Vec<T>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page.value);
        }
        Ok(items)
    }

    /// Item-by-item stream over every remaining page. Stops after the first error.
    pub fn into_stream(self) -> impl Stream<Item = ManagementResult<T>> {
        stream::unfold(
            (self, Vec::new().into_iter(), false),
            |(mut pager, mut buffered, failed)| async move {
                if failed {
                    return None;
                }
                loop {
                    if let Some(item) = buffered.next() {
                        return Some((Ok(item), (pager, buffered, false)));
                    }
                    match pager.next_page().await {
                        Ok(Some(page)) => buffered = page.value.into_iter(),
                        Ok(None) => return None,
                        Err(e) => return Some((Err(e), (pager, buffered, true))),
                    }
                }
            },
        )
    }
}
