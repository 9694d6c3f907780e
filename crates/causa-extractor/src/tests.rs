//! Integration tests for the pipeline

#[cfg(test)]
mod tests {
    use crate::{ExtractionError, ExtractionRequest, PipelineConfig, ProcessPipeline};
    use causa_llm::{MockAnalyzer, MockFailure};
    use causa_store::MemoryStore;
    use chrono::Utc;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response on an ephemeral port
    /// and return the URL pointing at it.
    async fn serve_once(status: &'static str, content_type: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut request = [0u8; 2048];
                let _ = socket.read(&mut request).await;

                let head = format!(
                    "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    content_type,
                    body.len()
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(&body).await;
            }
        });

        format!("http://{}/sample.pdf", addr)
    }

    fn pdf_bytes() -> Vec<u8> {
        b"%PDF-1.7\n1 0 obj\nendobj\ntrailer\n%%EOF".to_vec()
    }

    fn empty_result_payload() -> serde_json::Value {
        json!({
            "resume": "Processo de indenização.",
            "timeline": [],
            "evidence": []
        })
    }

    fn pipeline_with(
        analyzer: MockAnalyzer,
    ) -> ProcessPipeline<MockAnalyzer, MemoryStore> {
        ProcessPipeline::new(analyzer, MemoryStore::new(), PipelineConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetcher_returns_exact_bytes() {
        let url = serve_once("200 OK", "application/pdf", pdf_bytes()).await;
        let fetcher = crate::DocumentFetcher::with_limits(
            std::time::Duration::from_secs(5),
            1024 * 1024,
        );

        let bytes = fetcher.fetch(&url).await.unwrap();
        assert_eq!(bytes, pdf_bytes());
    }

    #[tokio::test]
    async fn test_fetcher_rejects_error_status() {
        let url = serve_once("404 Not Found", "application/pdf", pdf_bytes()).await;
        let fetcher =
            crate::DocumentFetcher::with_limits(std::time::Duration::from_secs(5), 1024 * 1024);

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Acquisition(_)));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_fetcher_rejects_html_masquerading_as_success() {
        // 200 status with an HTML error page must not pass
        let url = serve_once("200 OK", "text/html", b"<html>error</html>".to_vec()).await;
        let fetcher =
            crate::DocumentFetcher::with_limits(std::time::Duration::from_secs(5), 1024 * 1024);

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(err.to_string().contains("application/pdf"));
    }

    #[tokio::test]
    async fn test_fetcher_rejects_missing_magic_bytes() {
        let url = serve_once("200 OK", "application/pdf", b"not a pdf at all".to_vec()).await;
        let fetcher =
            crate::DocumentFetcher::with_limits(std::time::Duration::from_secs(5), 1024 * 1024);

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(err.to_string().contains("%PDF-"));
    }

    #[tokio::test]
    async fn test_fetcher_rejects_oversize_document() {
        let url = serve_once("200 OK", "application/pdf", pdf_bytes()).await;
        let fetcher =
            crate::DocumentFetcher::with_limits(std::time::Duration::from_secs(5), 8);

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(err.to_string().contains("limit"));
    }

    #[tokio::test]
    async fn test_fetcher_rejects_invalid_url() {
        let fetcher =
            crate::DocumentFetcher::with_limits(std::time::Duration::from_secs(5), 1024);

        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Acquisition(_)));
    }

    #[tokio::test]
    async fn test_end_to_end_empty_extraction() {
        let url = serve_once("200 OK", "application/pdf", pdf_bytes()).await;
        let pipeline = pipeline_with(MockAnalyzer::new(empty_result_payload()));

        let before = Utc::now();
        let record = pipeline
            .process(ExtractionRequest {
                pdf_url: url,
                case_id: "0809090-86.2024.8.12.0021".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(record.case_id, "0809090-86.2024.8.12.0021");
        assert!(record.timeline.is_empty());
        assert!(record.evidence.is_empty());

        // persisted_at comes from the orchestrator's clock
        let elapsed = record.persisted_at.signed_duration_since(before);
        assert!(elapsed.num_seconds() >= 0 && elapsed.num_seconds() < 5);

        // the validated record was persisted under the caller's id
        let stored = pipeline.store().get("0809090-86.2024.8.12.0021").unwrap();
        assert_eq!(stored, record);
    }

    #[tokio::test]
    async fn test_end_to_end_model_returns_non_json() {
        let url = serve_once("200 OK", "application/pdf", pdf_bytes()).await;
        let pipeline = pipeline_with(MockAnalyzer::failing(MockFailure::BadPayload));

        let err = pipeline
            .process(ExtractionRequest {
                pdf_url: url,
                case_id: "case-1".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractionError::ModelOutput(_)));
        assert!(pipeline.store().is_empty());
    }

    #[tokio::test]
    async fn test_end_to_end_model_unreachable() {
        let url = serve_once("200 OK", "application/pdf", pdf_bytes()).await;
        let pipeline = pipeline_with(MockAnalyzer::failing(MockFailure::Invocation));

        let err = pipeline
            .process(ExtractionRequest {
                pdf_url: url,
                case_id: "case-1".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractionError::ModelInvocation(_)));
    }

    #[tokio::test]
    async fn test_empty_case_id_fails_before_any_network_call() {
        let analyzer = MockAnalyzer::new(empty_result_payload());
        let pipeline = pipeline_with(analyzer.clone());

        let err = pipeline
            .process(ExtractionRequest {
                pdf_url: "https://example.com/sample.pdf".to_string(),
                case_id: "   ".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractionError::InvalidRequest(_)));
        assert_eq!(analyzer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_model_schema_violation_is_terminal() {
        let url = serve_once("200 OK", "application/pdf", pdf_bytes()).await;
        let pipeline = pipeline_with(MockAnalyzer::new(json!({
            "resume": "ok",
            "evidence": []
        })));

        let err = pipeline
            .process(ExtractionRequest {
                pdf_url: url,
                case_id: "case-1".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractionError::Validation(_)));
        assert!(pipeline.store().is_empty());
    }

    #[tokio::test]
    async fn test_reprocessing_same_case_upserts() {
        let payload = empty_result_payload();
        let pipeline = pipeline_with(MockAnalyzer::new(payload));

        for _ in 0..2 {
            let url = serve_once("200 OK", "application/pdf", pdf_bytes()).await;
            pipeline
                .process(ExtractionRequest {
                    pdf_url: url,
                    case_id: "case-1".to_string(),
                })
                .await
                .unwrap();
        }

        assert_eq!(pipeline.store().len(), 1);
    }

    #[tokio::test]
    async fn test_full_payload_round_trips_to_wire() {
        let url = serve_once("200 OK", "application/pdf", pdf_bytes()).await;
        let pipeline = pipeline_with(MockAnalyzer::new(json!({
            "resume": "Ação de cobrança com liminar deferida.",
            "timeline": [{
                "event_id": 0,
                "event_name": "Citação",
                "event_description": "Réu citado por oficial de justiça.",
                "event_date": "2024-05-20",
                "event_page_init": 18,
                "event_page_end": 19
            }],
            "evidence": [{
                "evidence_id": 0,
                "evidence_name": "Contrato",
                "evidence_flaw": null,
                "evidence_page_init": 3,
                "evidence_page_end": 9
            }]
        })));

        let record = pipeline
            .process(ExtractionRequest {
                pdf_url: url,
                case_id: "case-1".to_string(),
            })
            .await
            .unwrap();

        let wire = serde_json::to_string(&record).unwrap();
        let parsed: causa_domain::CaseRecord = serde_json::from_str(&wire).unwrap();
        assert_eq!(parsed, record);
        assert_eq!(parsed.timeline[0].event_name, "Citação");
    }
}
