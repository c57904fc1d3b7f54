//! Calculator Result Renderer.
//!
//! Submits a form to the Calculation Service, interprets the answer by
//! calculator type and hands the summary and chart datasets to the
//! rendering collaborators. Chart objects are owned here, one optional
//! handle per [`ChartSlot`], and every render releases the previous
//! handles before creating new ones.

use livability_calculator_models::{
    CalculatorResult, ChartData, ChartSlot, FormFields, Rendering, Summary,
};

use crate::amortization::{LoanTerms, amortization_schedule};
use crate::datasets::{affordability_bar, affordability_pie, amortization_line, dti_pie};
use crate::summary::{summarize, unknown_type_summary};
use crate::{CalculationService, CalculatorError};

/// Loading indicator, error panel and summary area of the calculator page.
pub trait CalculatorView {
    /// Shows the loading indicator.
    fn show_loading(&mut self);
    /// Hides the loading indicator.
    fn hide_loading(&mut self);
    /// Shows the error panel with `message`.
    fn show_error(&mut self, message: &str);
    /// Hides the error panel.
    fn hide_error(&mut self);
    /// Replaces the summary area.
    fn show_summary(&mut self, summary: &Summary);
}

/// Charting library bound to a set of drawing surfaces.
pub trait ChartBackend {
    /// A live chart object.
    type Handle;

    /// Draws `data` on `slot`'s surface.
    fn create(&mut self, slot: ChartSlot, data: &ChartData) -> Self::Handle;

    /// Destroys a chart, freeing its surface.
    fn release(&mut self, handle: Self::Handle);
}

/// At most one live chart per surface.
struct ChartSlots<H> {
    pie: Option<H>,
    bar: Option<H>,
    amortization: Option<H>,
}

impl<H> Default for ChartSlots<H> {
    fn default() -> Self {
        Self {
            pie: None,
            bar: None,
            amortization: None,
        }
    }
}

impl<H> ChartSlots<H> {
    const fn slot_mut(&mut self, slot: ChartSlot) -> &mut Option<H> {
        match slot {
            ChartSlot::Pie => &mut self.pie,
            ChartSlot::Bar => &mut self.bar,
            ChartSlot::Amortization => &mut self.amortization,
        }
    }

    const fn is_live(&self, slot: ChartSlot) -> bool {
        match slot {
            ChartSlot::Pie => self.pie.is_some(),
            ChartSlot::Bar => self.bar.is_some(),
            ChartSlot::Amortization => self.amortization.is_some(),
        }
    }
}

/// Renders calculator submissions.
pub struct CalculatorRenderer<S, V, C: ChartBackend> {
    service: S,
    view: V,
    backend: C,
    charts: ChartSlots<C::Handle>,
}

impl<S, V, C> CalculatorRenderer<S, V, C>
where
    S: CalculationService,
    V: CalculatorView,
    C: ChartBackend,
{
    /// Creates a renderer with no live charts.
    pub fn new(service: S, view: V, backend: C) -> Self {
        Self {
            service,
            view,
            backend,
            charts: ChartSlots::default(),
        }
    }

    /// Submits `fields` to the calculator named `type_name` and renders
    /// the result.
    ///
    /// An unrecognised type renders the fixed fallback summary without
    /// contacting the service. Service failures are shown in the error
    /// panel and returned; the loading indicator is hidden either way.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError`] if the service call fails or its answer
    /// does not match the type's schema.
    pub async fn submit(
        &mut self,
        type_name: &str,
        fields: &FormFields,
    ) -> Result<Rendering, CalculatorError> {
        let kind = match crate::parse_calculator_type(type_name) {
            Ok(kind) => kind,
            Err(e) => {
                log::warn!("{e}");
                self.view.hide_error();
                let rendering = Rendering {
                    summary: unknown_type_summary(),
                    charts: Vec::new(),
                };
                self.present(&rendering);
                return Ok(rendering);
            }
        };

        self.view.hide_error();
        self.view.show_loading();
        let outcome = self.service.calculate(kind, fields).await;
        self.view.hide_loading();

        match outcome {
            Ok(result) => {
                let rendering = render_result(&result, fields);
                self.present(&rendering);
                Ok(rendering)
            }
            Err(e) => {
                log::warn!("{kind} calculation failed: {e}");
                self.view.show_error(&e.user_message());
                Err(e)
            }
        }
    }

    /// Whether a chart is currently drawn on `slot`.
    #[must_use]
    pub const fn has_chart(&self, slot: ChartSlot) -> bool {
        self.charts.is_live(slot)
    }

    /// Releases every live chart.
    pub fn clear_charts(&mut self) {
        for &slot in ChartSlot::all() {
            if let Some(handle) = self.charts.slot_mut(slot).take() {
                log::debug!("releasing {slot} chart");
                self.backend.release(handle);
            }
        }
    }

    /// Consumes the renderer, releasing its charts and returning the
    /// collaborators.
    pub fn into_parts(mut self) -> (S, V, C) {
        self.clear_charts();
        (self.service, self.view, self.backend)
    }

    fn present(&mut self, rendering: &Rendering) {
        self.clear_charts();
        for (slot, data) in &rendering.charts {
            log::debug!("creating {slot} chart");
            let handle = self.backend.create(*slot, data);
            *self.charts.slot_mut(*slot) = Some(handle);
        }
        self.view.show_summary(&rendering.summary);
    }
}

/// Derives the summary and charts for `result`.
///
/// EMI results get a freshly computed amortization schedule from the
/// submitted rate and tenure; affordability and DTI results get a pie
/// (plus a bar for affordability); the rest are text only.
#[must_use]
pub fn render_result(result: &CalculatorResult, fields: &FormFields) -> Rendering {
    let mut charts = Vec::new();

    match result {
        CalculatorResult::Emi(emi) => match LoanTerms::from_form(fields) {
            Some(terms) => {
                let schedule = amortization_schedule(
                    emi.principal,
                    emi.emi,
                    terms.annual_rate_percent,
                    terms.tenure_months,
                );
                charts.push((
                    ChartSlot::Amortization,
                    ChartData::Line(amortization_line(&schedule)),
                ));
            }
            None => {
                log::warn!("EMI form lacks a usable rate/tenure; skipping amortization chart");
            }
        },
        CalculatorResult::Affordability(r) => {
            charts.push((ChartSlot::Pie, ChartData::Pie(affordability_pie(r))));
            charts.push((ChartSlot::Bar, ChartData::Bar(affordability_bar(r))));
        }
        CalculatorResult::Dti(r) => {
            charts.push((ChartSlot::Pie, ChartData::Pie(dti_pie(r))));
        }
        CalculatorResult::Gratuity(_) | CalculatorResult::Retirement(_) => {}
    }

    Rendering {
        summary: summarize(result),
        charts,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use livability_calculator_models::{CalculatorType, PieDataset};

    use super::*;
    use crate::interpret_response;
    use crate::summary::UNKNOWN_TYPE_MESSAGE;

    struct FakeService {
        body: serde_json::Value,
        status: Option<u16>,
        calls: Mutex<Vec<(CalculatorType, FormFields)>>,
    }

    impl FakeService {
        fn answering(body: serde_json::Value) -> Self {
            Self {
                body,
                status: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl CalculationService for FakeService {
        async fn calculate(
            &self,
            kind: CalculatorType,
            fields: &FormFields,
        ) -> Result<CalculatorResult, CalculatorError> {
            self.calls.lock().unwrap().push((kind, fields.clone()));
            if let Some(status) = self.status {
                return Err(CalculatorError::Status { status });
            }
            interpret_response(kind, self.body.clone())
        }
    }

    #[derive(Default)]
    struct RecordingView {
        loading: bool,
        loading_shown: usize,
        error: Option<String>,
        summary: Option<Summary>,
    }

    impl CalculatorView for RecordingView {
        fn show_loading(&mut self) {
            self.loading = true;
            self.loading_shown += 1;
        }

        fn hide_loading(&mut self) {
            self.loading = false;
        }

        fn show_error(&mut self, message: &str) {
            self.error = Some(message.to_string());
        }

        fn hide_error(&mut self) {
            self.error = None;
        }

        fn show_summary(&mut self, summary: &Summary) {
            self.summary = Some(summary.clone());
        }
    }

    #[derive(Default)]
    struct RecordingCharts {
        next_id: u32,
        live: Vec<(u32, ChartSlot)>,
        log: Vec<String>,
    }

    impl ChartBackend for RecordingCharts {
        type Handle = u32;

        fn create(&mut self, slot: ChartSlot, _data: &ChartData) -> u32 {
            assert!(
                self.live.iter().all(|(_, s)| *s != slot),
                "{slot} surface still bound"
            );
            self.next_id += 1;
            self.live.push((self.next_id, slot));
            self.log.push(format!("create {slot} #{}", self.next_id));
            self.next_id
        }

        fn release(&mut self, handle: u32) {
            self.live.retain(|(id, _)| *id != handle);
            self.log.push(format!("release #{handle}"));
        }
    }

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn affordability_body() -> serde_json::Value {
        serde_json::json!({
            "max_emi": 8000.0,
            "affordable_loan": 480000.0,
            "affordable_property": 1480000.0,
            "income": 100000.0,
            "expenses": 30000.0,
            "existing_emis": 20000.0,
            "down_payment": 1000000.0,
            "remaining_income": 50000.0
        })
    }

    fn renderer(
        service: FakeService,
    ) -> CalculatorRenderer<FakeService, RecordingView, RecordingCharts> {
        CalculatorRenderer::new(service, RecordingView::default(), RecordingCharts::default())
    }

    #[tokio::test]
    async fn unknown_type_renders_fallback_without_request() {
        let mut r = renderer(FakeService::answering(serde_json::json!({})));
        let rendering = r.submit("mortgage", &fields(&[])).await.unwrap();

        assert_eq!(rendering.summary.title, UNKNOWN_TYPE_MESSAGE);
        assert!(rendering.charts.is_empty());

        let (service, view, charts) = r.into_parts();
        assert_eq!(service.call_count(), 0);
        assert_eq!(view.summary.unwrap().title, UNKNOWN_TYPE_MESSAGE);
        assert_eq!(view.loading_shown, 0);
        assert!(charts.live.is_empty());
    }

    #[tokio::test]
    async fn emi_renders_schedule_from_form_terms() {
        let mut r = renderer(FakeService::answering(serde_json::json!({
            "principal": 100000.0,
            "emi": 5000.0,
            "total_interest": 2000.0,
            "total_payment": 102000.0
        })));
        let form = fields(&[("loan_amount", "100000"), ("rate", "12"), ("tenure", "3")]);
        let rendering = r.submit("emi", &form).await.unwrap();

        let Some(ChartData::Line(line)) = rendering.chart(ChartSlot::Amortization) else {
            panic!("expected amortization line chart");
        };
        assert_eq!(line.periods, vec![1, 2, 3]);
        assert!((line.series[1].values[2] - 919.6).abs() < 1e-6);
        assert!(r.has_chart(ChartSlot::Amortization));
        assert!(!r.has_chart(ChartSlot::Pie));

        let (service, view, _) = r.into_parts();
        let calls = service.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, CalculatorType::Emi);
        assert_eq!(calls[0].1, form);
        assert!(!view.loading);
        assert_eq!(view.summary.unwrap().lines[1].value, "₹5,000.00");
    }

    #[tokio::test]
    async fn emi_without_tenure_still_renders_summary() {
        let mut r = renderer(FakeService::answering(serde_json::json!({
            "principal": 100000.0,
            "emi": 5000.0,
            "total_interest": 2000.0,
            "total_payment": 102000.0
        })));
        let rendering = r.submit("emi", &fields(&[("rate", "12")])).await.unwrap();
        assert!(rendering.charts.is_empty());
        assert_eq!(rendering.summary.lines.len(), 4);
    }

    #[tokio::test]
    async fn affordability_renders_pie_and_bar() {
        let mut r = renderer(FakeService::answering(affordability_body()));
        let rendering = r.submit("affordability", &fields(&[])).await.unwrap();

        let Some(ChartData::Pie(PieDataset { total, slices })) = rendering.chart(ChartSlot::Pie)
        else {
            panic!("expected pie chart");
        };
        assert!((total - 100_000.0).abs() < f64::EPSILON);
        assert_eq!(slices.len(), 3);
        assert!(matches!(
            rendering.chart(ChartSlot::Bar),
            Some(ChartData::Bar(_))
        ));
        assert!(r.has_chart(ChartSlot::Pie));
        assert!(r.has_chart(ChartSlot::Bar));
    }

    #[tokio::test]
    async fn rerender_releases_before_recreating() {
        let mut r = renderer(FakeService::answering(affordability_body()));
        r.submit("affordability", &fields(&[])).await.unwrap();
        r.submit("affordability", &fields(&[])).await.unwrap();

        let (_, _, charts) = r.into_parts();
        assert_eq!(
            charts.log,
            vec![
                "create pie #1",
                "create bar #2",
                "release #1",
                "release #2",
                "create pie #3",
                "create bar #4",
                "release #3",
                "release #4",
            ]
        );
        assert!(charts.live.is_empty());
    }

    #[tokio::test]
    async fn text_only_result_clears_previous_charts() {
        let mut r = renderer(FakeService::answering(affordability_body()));
        r.submit("affordability", &fields(&[])).await.unwrap();

        r.service = FakeService::answering(serde_json::json!({"gratuity": 288461.54}));
        let rendering = r.submit("gratuity", &fields(&[])).await.unwrap();
        assert!(rendering.charts.is_empty());
        assert_eq!(rendering.summary.lines[0].value, "₹2,88,461.54");
        assert!(ChartSlot::all().iter().all(|&s| !r.has_chart(s)));
    }

    #[tokio::test]
    async fn service_error_body_is_shown_and_loading_cleared() {
        let mut r = renderer(FakeService::answering(
            serde_json::json!({"error": "float division by zero"}),
        ));
        let err = r.submit("dti", &fields(&[])).await.unwrap_err();
        assert!(matches!(err, CalculatorError::Service { .. }));

        let (_, view, charts) = r.into_parts();
        assert!(!view.loading);
        assert_eq!(view.error.as_deref(), Some("Error: float division by zero"));
        assert!(view.summary.is_none());
        assert!(charts.log.is_empty());
    }

    #[tokio::test]
    async fn http_failure_shows_generic_message() {
        let mut service = FakeService::answering(serde_json::json!({}));
        service.status = Some(502);
        let mut r = renderer(service);
        let err = r.submit("retirement", &fields(&[])).await.unwrap_err();
        assert!(matches!(err, CalculatorError::Status { status: 502 }));

        let (_, view, _) = r.into_parts();
        assert!(!view.loading);
        assert_eq!(view.error.as_deref(), Some("Calculation failed"));
    }

    #[tokio::test]
    async fn unknown_type_clears_previous_error() {
        let mut service = FakeService::answering(serde_json::json!({}));
        service.status = Some(500);
        let mut r = renderer(service);
        r.submit("gratuity", &fields(&[])).await.unwrap_err();
        assert_eq!(r.view.error.as_deref(), Some("Calculation failed"));

        r.submit("pension", &fields(&[])).await.unwrap();
        assert!(r.view.error.is_none());
        assert_eq!(
            r.view.summary.as_ref().map(|s| s.title.as_str()),
            Some(UNKNOWN_TYPE_MESSAGE)
        );
    }
}
