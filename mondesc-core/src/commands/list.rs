use std::collections::HashSet;

use crate::descriptor::{Descriptor, DescriptorService, ListRequest};
use crate::error::{MonitoringError, Result};
use crate::format::DescriptorSink;

/// List every descriptor of the request's kind for its project.
///
/// Pages are fetched strictly in sequence, each continuation request using
/// the token from the page before it, until the service reports no further
/// pages. Every page is handed to `sink` as soon as it arrives. The returned
/// descriptors are all pages concatenated in server order, unfiltered.
///
/// Errors from the service propagate unchanged; anything already written to
/// the sink stays written.
pub async fn list_descriptors(
    service: &dyn DescriptorService,
    request: &ListRequest,
    sink: &mut dyn DescriptorSink,
) -> Result<Vec<Descriptor>> {
    let kind = request.kind();
    let mut descriptors = Vec::new();
    let mut page_token: Option<String> = None;
    let mut seen_tokens = HashSet::new();
    let mut page_num = 0usize;

    loop {
        page_num += 1;
        let page = service
            .list_page(kind, &request.page(page_token.clone()))
            .await?;
        tracing::debug!(
            %kind,
            project = %request.project(),
            page = page_num,
            items = page.items.len(),
            more = page.next_page_token.is_some(),
            "received page"
        );

        sink.write_page(kind, &page.items)?;
        descriptors.extend(page.items);

        match page.next_page_token {
            None => break,
            Some(next) if seen_tokens.contains(&next) => {
                return Err(MonitoringError::Unknown(tonic::Status::internal(format!(
                    "service returned an already used page token ({next:?}) after page {page_num}"
                ))));
            }
            Some(next) => {
                seen_tokens.insert(next.clone());
                page_token = Some(next);
            }
        }
    }

    tracing::info!(
        %kind,
        project = %request.project(),
        pages = page_num,
        total = descriptors.len(),
        "listing complete"
    );
    Ok(descriptors)
}
