//! The step controller.
//!
//! The nucleus of the funnel: every screen transition, every session
//! mutation and every call to the scoring service goes through here.
//! Collaborators raise; this is the sole catcher. Failures fold into the
//! single shared error slot and the controller decides the user-visible
//! step. The in-flight guards suppress duplicate loads and submissions at
//! entry, so a completed call always reflects the most recently issued
//! request.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::api::{ApiError, ResultRequest, ScoringApi, SessionInfo};
use crate::models::{Question, TestKind};
use crate::router::{Route, Router};
use crate::store::SessionStore;

use super::poller::UnlockPoller;
use super::state::{FunnelApp, Step};

/// Funnel state shared between the event loop and spawned tasks.
pub type SharedApp = Arc<Mutex<FunnelApp>>;

/// User-facing message for any transport or data-shape failure. Raw error
/// text stays in the logs.
pub const GENERIC_API_ERROR: &str =
    "Não foi possível se conectar à API ou carregar o teste. Tente novamente.";

/// Feedback after a manual unlock check that found no payment yet.
pub const PAYMENT_PENDING_NOTE: &str =
    "Pagamento ainda não confirmado. Tente novamente em instantes.";

enum SubmitOutcome {
    /// Guard rejected the call: one already in flight, or nothing to send.
    Skipped,
    /// Result stored; the flag says whether the full report is unlocked.
    Finished(bool),
    Failed,
}

/// Drives the funnel. Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct Controller {
    app: SharedApp,
    api: Arc<dyn ScoringApi>,
    store: Arc<SessionStore>,
    router: Router,
    poller: Arc<Mutex<UnlockPoller>>,
}

impl Controller {
    pub fn new(
        app: SharedApp,
        api: Arc<dyn ScoringApi>,
        store: Arc<SessionStore>,
        router: Router,
    ) -> Self {
        Self {
            app,
            api,
            store,
            router,
            poller: Arc::new(Mutex::new(UnlockPoller::default())),
        }
    }

    /// Reconcile the funnel with the current location.
    ///
    /// Runs once at startup and once per navigation event, and is safe to
    /// call redundantly: a live API session for the addressed test is
    /// preserved together with its in-progress answers.
    pub async fn sync_route(&self) {
        let route = Route::parse(&self.router.current_path());
        {
            let mut app = self.app.lock().await;
            match route {
                Route::Home | Route::Unknown => {
                    leave_payment_screen(&mut app);
                    app.step = Step::Home;
                }
                Route::Test(kind) => {
                    if !app.session.has_live_session(kind) {
                        app.session.reset_for(kind);
                        app.clear_questions();
                        self.store.save(&app.session);
                    }
                    leave_payment_screen(&mut app);
                    app.step = Step::Landing;
                }
            }
        }
        self.stop_poller().await;
    }

    /// Home screen pick: start the API session first, then address the
    /// test. The route listener lands the funnel on the test's screen; the
    /// freshly minted session id keeps the sync from resetting it again.
    pub async fn select_test(&self, kind: TestKind) {
        if self.load_test_session(kind).await {
            self.router.navigate(&format!("/{}", kind.slug()));
        }
    }

    /// Landing start: reuse cached questions when they belong to the active
    /// test, otherwise load them (covers a reload landing straight here).
    pub async fn start_quiz(&self) {
        let (kind, needs_load) = {
            let app = self.app.lock().await;
            let Some(kind) = app.session.test_kind else {
                return;
            };
            (kind, !app.has_questions_for(kind))
        };

        if needs_load && !self.load_test_session(kind).await {
            return;
        }

        let mut app = self.app.lock().await;
        app.reset_quiz_cursor();
        app.step = Step::Quiz;
    }

    /// Start a test session with the scoring service and seed the funnel
    /// with its questions. Returns whether the load committed.
    ///
    /// On failure the question cache and the API identity fields are
    /// cleared, but the test kind is preserved so the visitor keeps their
    /// context and a plain retry works.
    pub async fn load_test_session(&self, kind: TestKind) -> bool {
        {
            let mut app = self.app.lock().await;
            if app.loading {
                return false;
            }
            app.loading = true;
            app.error = None;
        }

        let outcome = self.fetch_session(kind).await;

        let mut app = self.app.lock().await;
        app.loading = false;
        match outcome {
            Ok((info, questions)) => {
                app.session.reset_for(kind);
                app.session.id = info.identificador;
                app.session.api_version = Some(info.version);
                app.session.api_status = Some(info.status);
                app.set_questions(kind, questions);
                self.store.save(&app.session);
                true
            }
            Err(e) => {
                tracing::warn!("start-test for {} failed: {e}", kind.slug());
                app.clear_questions();
                app.session.id.clear();
                app.session.api_version = None;
                app.session.api_status = None;
                self.store.save(&app.session);
                app.error = Some(GENERIC_API_ERROR.to_string());
                false
            }
        }
    }

    async fn fetch_session(
        &self,
        kind: TestKind,
    ) -> Result<(SessionInfo, Vec<Question>), ApiError> {
        let response = self.api.start_test(kind.api_code()).await?;
        let questions = response
            .teste
            .perguntas
            .into_iter()
            .map(|raw| raw.into_question())
            .collect::<Result<Vec<_>, _>>()?;
        Ok((response.sessao, questions))
    }

    /// Record the selected option for the question on screen and advance
    /// the cursor. Returns true when that was the last question and the
    /// answers are ready to submit.
    pub async fn answer_current(&self) -> bool {
        let mut app = self.app.lock().await;
        if app.step != Step::Quiz {
            return false;
        }
        let Some((question_id, option_code)) = app.current_selection() else {
            return false;
        };
        app.session.record_answer(question_id, &option_code);
        self.store.save(&app.session);
        !app.advance_question()
    }

    /// Submit the collected answers from the quiz. Completeness decides
    /// between the full result and the teaser preview; a failure bounces
    /// back to the landing with the prior result untouched.
    pub async fn submit_result(&self) {
        match self.submit_answers().await {
            SubmitOutcome::Skipped => {}
            SubmitOutcome::Finished(complete) => {
                let mut app = self.app.lock().await;
                app.result_scroll = 0;
                app.step = if complete { Step::Result } else { Step::Preview };
            }
            SubmitOutcome::Failed => {
                let mut app = self.app.lock().await;
                app.step = Step::Landing;
            }
        }
    }

    /// Re-check whether payment released the full report. Only a complete
    /// result leaves the payment screen; failures and teasers stay put.
    pub async fn check_unlock(&self, manual: bool) -> bool {
        match self.submit_answers().await {
            SubmitOutcome::Finished(true) => {
                {
                    let mut app = self.app.lock().await;
                    leave_payment_screen(&mut app);
                    app.result_scroll = 0;
                    app.step = Step::Result;
                }
                self.stop_poller().await;
                true
            }
            SubmitOutcome::Finished(false) => {
                if manual {
                    let mut app = self.app.lock().await;
                    app.payment_note = Some(PAYMENT_PENDING_NOTE.to_string());
                }
                false
            }
            SubmitOutcome::Skipped | SubmitOutcome::Failed => false,
        }
    }

    /// The shared submit operation behind quiz scoring and unlock polling:
    /// one guarded scoring call, result stored verbatim on success.
    async fn submit_answers(&self) -> SubmitOutcome {
        let request = {
            let mut app = self.app.lock().await;
            if app.submitting {
                return SubmitOutcome::Skipped;
            }
            let Some(kind) = app.session.test_kind else {
                return SubmitOutcome::Skipped;
            };
            let respostas = app.session.to_submission();
            if respostas.is_empty() {
                // Nothing to score; never issue the call.
                return SubmitOutcome::Skipped;
            }
            app.submitting = true;
            app.error = None;
            ResultRequest {
                tipo_teste: kind.api_code().to_string(),
                respostas,
            }
        };

        let outcome = self.api.fetch_result(&request).await;

        let mut app = self.app.lock().await;
        app.submitting = false;
        match outcome {
            Ok(result) => {
                let complete = result.informacoes_completas;
                app.session.result = Some(result);
                self.store.save(&app.session);
                SubmitOutcome::Finished(complete)
            }
            Err(e) => {
                tracing::warn!("obter-resultado failed: {e}");
                app.error = Some(GENERIC_API_ERROR.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    /// Move from the preview to the payment screen and start polling.
    pub async fn request_unlock(&self) {
        {
            let mut app = self.app.lock().await;
            if app.step != Step::Preview {
                return;
            }
            // Only a teaser result has anything left to unlock.
            let still_locked = app
                .session
                .result
                .as_ref()
                .is_some_and(|r| !r.informacoes_completas);
            if !still_locked {
                return;
            }
            app.payment_note = None;
            app.payment_entered_at = Some(Instant::now());
            app.step = Step::Payment;
        }
        self.poller.lock().await.start(self.clone());
    }

    /// Payment screen cancel: back to the preview, poller stopped.
    pub async fn cancel_payment(&self) {
        {
            let mut app = self.app.lock().await;
            if app.step != Step::Payment {
                return;
            }
            leave_payment_screen(&mut app);
            app.step = Step::Preview;
        }
        self.stop_poller().await;
    }

    /// Recoverable-fallback action: back to the landing of the active test.
    pub async fn back_to_landing(&self) {
        let mut app = self.app.lock().await;
        app.step = Step::Landing;
    }

    /// Address the root; the route listener moves the funnel home.
    pub fn go_home(&self) {
        self.router.navigate("/");
    }

    pub async fn dismiss_error(&self) {
        self.app.lock().await.dismiss_error();
    }

    /// Cancel unlock polling if it is running. Never called while the app
    /// lock is held.
    pub async fn stop_poller(&self) {
        self.poller.lock().await.stop();
    }
}

/// Clear payment-screen residue when the funnel leaves it by any path.
fn leave_payment_screen(app: &mut FunnelApp) {
    app.payment_entered_at = None;
    app.payment_note = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Alternativa, ApiQuestion, StartTestResponse, TestPayload, TestResult};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    struct FakeApi {
        question_count: usize,
        complete: AtomicBool,
        fail_start: AtomicBool,
        fail_result: AtomicBool,
        start_delay: Duration,
        result_delay: Duration,
        start_calls: AtomicUsize,
        result_calls: AtomicUsize,
        last_request: std::sync::Mutex<Option<ResultRequest>>,
    }

    impl FakeApi {
        fn new(question_count: usize) -> Self {
            Self {
                question_count,
                complete: AtomicBool::new(false),
                fail_start: AtomicBool::new(false),
                fail_result: AtomicBool::new(false),
                start_delay: Duration::ZERO,
                result_delay: Duration::ZERO,
                start_calls: AtomicUsize::new(0),
                result_calls: AtomicUsize::new(0),
                last_request: std::sync::Mutex::new(None),
            }
        }

        fn start_response(&self) -> StartTestResponse {
            let perguntas = (1..=self.question_count as u32)
                .map(|id| ApiQuestion {
                    id_pergunta: id,
                    aceita_maisde_uma_resposta: false,
                    descricao: format!("Pergunta {id}"),
                    alternativas: Some(vec![
                        Alternativa {
                            letra: "a".to_string(),
                            texto: "Primeira".to_string(),
                        },
                        Alternativa {
                            letra: "b".to_string(),
                            texto: "Segunda".to_string(),
                        },
                    ]),
                    opcoes: None,
                })
                .collect();

            StartTestResponse {
                sessao: SessionInfo {
                    identificador: uuid::Uuid::new_v4().to_string(),
                    version: 1,
                    status: "EmAndamento".to_string(),
                    horario_inicio: "2024-06-01T12:00:00Z".to_string(),
                },
                teste: TestPayload {
                    titulo: "Teste".to_string(),
                    descricao: "Descrição".to_string(),
                    minutos_estimados: 2,
                    quantidade_total_pergunta: self.question_count as u32,
                    perguntas,
                },
            }
        }
    }

    #[async_trait::async_trait]
    impl ScoringApi for FakeApi {
        async fn start_test(&self, _api_code: &str) -> Result<StartTestResponse, ApiError> {
            self.start_calls.fetch_add(1, Ordering::SeqCst);
            if !self.start_delay.is_zero() {
                tokio::time::sleep(self.start_delay).await;
            }
            if self.fail_start.load(Ordering::SeqCst) {
                return Err(ApiError::Status(reqwest::StatusCode::BAD_GATEWAY));
            }
            Ok(self.start_response())
        }

        async fn fetch_result(&self, request: &ResultRequest) -> Result<TestResult, ApiError> {
            self.result_calls.fetch_add(1, Ordering::SeqCst);
            if !self.result_delay.is_zero() {
                tokio::time::sleep(self.result_delay).await;
            }
            self.last_request.lock().unwrap().replace(request.clone());
            if self.fail_result.load(Ordering::SeqCst) {
                return Err(ApiError::Status(reqwest::StatusCode::BAD_GATEWAY));
            }
            let complete = self.complete.load(Ordering::SeqCst);
            Ok(TestResult {
                informacoes_completas: complete,
                perfil: "Perfil Executor".to_string(),
                frase: "Resultados são seu único norte.".to_string(),
                texto: complete.then(|| "Relatório completo do perfil.".to_string()),
            })
        }
    }

    fn harness(api: Arc<FakeApi>) -> (Controller, SharedApp, Router, TempDir) {
        let tmp = TempDir::new().unwrap();
        let store = Arc::new(SessionStore::new(tmp.path()));
        let app: SharedApp = Arc::new(Mutex::new(FunnelApp::new(store.load())));
        let router = Router::new("/");
        let controller = Controller::new(Arc::clone(&app), api, store, router.clone());
        (controller, app, router, tmp)
    }

    /// Walk the quiz answering the highlighted option of every question.
    async fn answer_all(controller: &Controller) {
        loop {
            if controller.answer_current().await {
                break;
            }
        }
    }

    async fn wait_until<F>(app: &SharedApp, predicate: F)
    where
        F: Fn(&FunnelApp) -> bool,
    {
        for _ in 0..1000 {
            if predicate(&*app.lock().await) {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("condition not reached");
    }

    #[tokio::test]
    async fn test_home_selection_loads_and_lands() {
        let api = Arc::new(FakeApi::new(5));
        let (controller, app, _router, tmp) = harness(Arc::clone(&api));

        controller.select_test(TestKind::Carreira).await;
        controller.sync_route().await;

        let app = app.lock().await;
        assert_eq!(app.step, Step::Landing);
        assert!(!app.session.id.is_empty());
        assert_eq!(app.session.test_kind, Some(TestKind::Carreira));
        assert_eq!(app.session.api_version, Some(1));
        assert!(app.has_questions_for(TestKind::Carreira));
        assert_eq!(app.total_questions(), 5);

        // The committed session is on disk.
        let persisted = SessionStore::new(tmp.path()).load();
        assert_eq!(persisted.id, app.session.id);
    }

    #[tokio::test]
    async fn test_start_quiz_reuses_loaded_questions() {
        let api = Arc::new(FakeApi::new(3));
        let (controller, app, _router, _tmp) = harness(Arc::clone(&api));

        controller.select_test(TestKind::Qi).await;
        controller.sync_route().await;
        controller.start_quiz().await;

        let app = app.lock().await;
        assert_eq!(app.step, Step::Quiz);
        assert_eq!(app.current_index(), 0);
        assert_eq!(api.start_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_start_quiz_reloads_after_losing_the_cache() {
        let api = Arc::new(FakeApi::new(3));
        let (controller, app, _router, _tmp) = harness(Arc::clone(&api));

        controller.select_test(TestKind::Qi).await;
        controller.sync_route().await;
        app.lock().await.clear_questions(); // a reload dropped them

        controller.start_quiz().await;

        let app = app.lock().await;
        assert_eq!(app.step, Step::Quiz);
        assert!(app.has_questions_for(TestKind::Qi));
        assert_eq!(api.start_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_route_guard_preserves_live_session() {
        let api = Arc::new(FakeApi::new(2));
        let (controller, app, router, _tmp) = harness(api);

        controller.select_test(TestKind::Personalidade).await;
        controller.sync_route().await;
        controller.start_quiz().await;
        controller.answer_current().await;

        // An unrelated re-fire of the synchronizer for the same slug.
        router.navigate("/personalidade");
        controller.sync_route().await;

        let app = app.lock().await;
        assert_eq!(app.step, Step::Landing);
        assert_eq!(app.session.answers.len(), 1);
        assert!(!app.session.id.is_empty());
    }

    #[tokio::test]
    async fn test_route_switch_resets_atomically() {
        let api = Arc::new(FakeApi::new(2));
        let (controller, app, router, _tmp) = harness(api);

        controller.select_test(TestKind::Carreira).await;
        controller.sync_route().await;
        controller.start_quiz().await;
        controller.answer_current().await;

        router.navigate("/personalidade");
        controller.sync_route().await;

        let app = app.lock().await;
        assert_eq!(app.step, Step::Landing);
        assert_eq!(app.session.test_kind, Some(TestKind::Personalidade));
        assert!(app.session.id.is_empty());
        assert!(app.session.answers.is_empty());
        assert!(app.session.result.is_none());
        assert!(!app.has_questions_for(TestKind::Carreira));
    }

    #[tokio::test]
    async fn test_unknown_route_goes_home() {
        let api = Arc::new(FakeApi::new(2));
        let (controller, app, router, _tmp) = harness(api);

        router.navigate("/horoscopo");
        controller.sync_route().await;
        assert_eq!(app.lock().await.step, Step::Home);

        router.navigate("/");
        controller.sync_route().await;
        assert_eq!(app.lock().await.step, Step::Home);
    }

    #[tokio::test]
    async fn test_loader_failure_preserves_kind_and_allows_retry() {
        let api = Arc::new(FakeApi::new(2));
        let (controller, app, router, _tmp) = harness(Arc::clone(&api));

        router.navigate("/carreira");
        controller.sync_route().await;

        api.fail_start.store(true, Ordering::SeqCst);
        assert!(!controller.load_test_session(TestKind::Carreira).await);
        {
            let app = app.lock().await;
            assert_eq!(app.error.as_deref(), Some(GENERIC_API_ERROR));
            assert!(app.session.id.is_empty());
            assert_eq!(app.session.test_kind, Some(TestKind::Carreira));
            assert!(!app.loading);
            assert!(!app.has_questions_for(TestKind::Carreira));
        }

        // A plain retry for the same slug works without re-navigating.
        api.fail_start.store(false, Ordering::SeqCst);
        assert!(controller.load_test_session(TestKind::Carreira).await);
        let app = app.lock().await;
        assert!(app.error.is_none());
        assert!(!app.session.id.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_load_is_suppressed() {
        let mut api = FakeApi::new(2);
        api.start_delay = Duration::from_millis(200);
        let api = Arc::new(api);
        let (controller, app, _router, _tmp) = harness(Arc::clone(&api));

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.load_test_session(TestKind::Qi).await })
        };
        wait_until(&app, |app| app.loading).await;

        assert!(!controller.load_test_session(TestKind::Qi).await);
        assert!(first.await.unwrap());
        assert_eq!(api.start_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_submission_never_hits_network() {
        let api = Arc::new(FakeApi::new(2));
        let (controller, app, _router, _tmp) = harness(Arc::clone(&api));

        app.lock().await.session.test_kind = Some(TestKind::Carreira);
        controller.submit_result().await;

        assert_eq!(api.result_calls.load(Ordering::SeqCst), 0);
        assert_eq!(app.lock().await.step, Step::Home);
    }

    #[tokio::test]
    async fn test_overlapping_submits_issue_one_call() {
        let mut api = FakeApi::new(2);
        api.result_delay = Duration::from_millis(200);
        let api = Arc::new(api);
        let (controller, app, _router, _tmp) = harness(Arc::clone(&api));

        controller.select_test(TestKind::Carreira).await;
        controller.sync_route().await;
        controller.start_quiz().await;
        answer_all(&controller).await;

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit_result().await })
        };
        wait_until(&app, |app| app.submitting).await;

        // Second click while the first is in flight: dropped at entry.
        controller.submit_result().await;
        first.await.unwrap();

        assert_eq!(api.result_calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.lock().await.step, Step::Preview);
    }

    #[tokio::test]
    async fn test_quiz_completion_teaser_goes_to_preview() {
        let api = Arc::new(FakeApi::new(4));
        let (controller, app, _router, _tmp) = harness(Arc::clone(&api));

        controller.select_test(TestKind::Carreira).await;
        controller.sync_route().await;
        controller.start_quiz().await;
        answer_all(&controller).await;
        controller.submit_result().await;

        {
            let app = app.lock().await;
            assert_eq!(app.step, Step::Preview);
            let result = app.session.result.as_ref().unwrap();
            assert!(!result.informacoes_completas);
            assert_eq!(result.perfil, "Perfil Executor");
        }

        let request = api.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.tipo_teste, "CA");
        let ids: Vec<u32> = request.respostas.iter().map(|r| r.id_pergunta).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(
            request
                .respostas
                .iter()
                .all(|r| r.alternativa_letra == "A")
        );
    }

    #[tokio::test]
    async fn test_quiz_completion_complete_goes_straight_to_result() {
        let api = Arc::new(FakeApi::new(2));
        api.complete.store(true, Ordering::SeqCst);
        let (controller, app, _router, _tmp) = harness(api);

        controller.select_test(TestKind::Qi).await;
        controller.sync_route().await;
        controller.start_quiz().await;
        answer_all(&controller).await;
        controller.submit_result().await;

        assert_eq!(app.lock().await.step, Step::Result);
    }

    #[tokio::test]
    async fn test_submit_failure_returns_to_landing() {
        let api = Arc::new(FakeApi::new(2));
        let (controller, app, _router, _tmp) = harness(Arc::clone(&api));

        controller.select_test(TestKind::Carreira).await;
        controller.sync_route().await;
        controller.start_quiz().await;
        answer_all(&controller).await;

        api.fail_result.store(true, Ordering::SeqCst);
        controller.submit_result().await;

        let app = app.lock().await;
        assert_eq!(app.step, Step::Landing);
        assert_eq!(app.error.as_deref(), Some(GENERIC_API_ERROR));
        assert!(app.session.result.is_none()); // prior result untouched
        assert!(!app.submitting);
    }

    #[tokio::test]
    async fn test_unlock_flow_polls_until_complete() {
        let api = Arc::new(FakeApi::new(2));
        let (controller, app, _router, _tmp) = harness(Arc::clone(&api));

        controller.select_test(TestKind::Carreira).await;
        controller.sync_route().await;
        controller.start_quiz().await;
        answer_all(&controller).await;
        controller.submit_result().await;
        assert_eq!(app.lock().await.step, Step::Preview);

        controller.request_unlock().await;
        {
            let app = app.lock().await;
            assert_eq!(app.step, Step::Payment);
            assert!(app.payment_entered_at.is_some());
        }
        assert!(controller.poller.lock().await.is_running());

        // Still locked: the check stays on the payment screen.
        assert!(!controller.check_unlock(false).await);
        assert_eq!(app.lock().await.step, Step::Payment);

        // Payment cleared server-side; the next check unlocks.
        api.complete.store(true, Ordering::SeqCst);
        assert!(controller.check_unlock(true).await);
        {
            let app = app.lock().await;
            assert_eq!(app.step, Step::Result);
            assert!(app.payment_entered_at.is_none());
            assert!(app.session.result.as_ref().unwrap().informacoes_completas);
        }
        assert!(!controller.poller.lock().await.is_running());
    }

    #[tokio::test]
    async fn test_manual_check_notes_pending_payment() {
        let api = Arc::new(FakeApi::new(2));
        let (controller, app, _router, _tmp) = harness(Arc::clone(&api));

        controller.select_test(TestKind::Carreira).await;
        controller.sync_route().await;
        controller.start_quiz().await;
        answer_all(&controller).await;
        controller.submit_result().await;
        controller.request_unlock().await;

        // Let the poller's immediate check drain so the manual one is not
        // dropped by the in-flight guard.
        for _ in 0..1000 {
            if api.result_calls.load(Ordering::SeqCst) >= 2 {
                break;
            }
            tokio::task::yield_now().await;
        }
        wait_until(&app, |app| !app.submitting).await;

        assert!(!controller.check_unlock(true).await);
        let app = app.lock().await;
        assert_eq!(app.step, Step::Payment);
        assert_eq!(app.payment_note.as_deref(), Some(PAYMENT_PENDING_NOTE));
    }

    #[tokio::test]
    async fn test_cancel_payment_returns_to_preview() {
        let api = Arc::new(FakeApi::new(2));
        let (controller, app, _router, _tmp) = harness(api);

        controller.select_test(TestKind::Carreira).await;
        controller.sync_route().await;
        controller.start_quiz().await;
        answer_all(&controller).await;
        controller.submit_result().await;
        controller.request_unlock().await;

        controller.cancel_payment().await;

        {
            let app = app.lock().await;
            assert_eq!(app.step, Step::Preview);
            assert!(app.payment_entered_at.is_none());
            assert!(app.payment_note.is_none());
        }
        assert!(!controller.poller.lock().await.is_running());
    }

    #[tokio::test]
    async fn test_route_change_stops_payment_poller() {
        let api = Arc::new(FakeApi::new(2));
        let (controller, app, router, _tmp) = harness(api);

        controller.select_test(TestKind::Carreira).await;
        controller.sync_route().await;
        controller.start_quiz().await;
        answer_all(&controller).await;
        controller.submit_result().await;
        controller.request_unlock().await;

        router.navigate("/");
        controller.sync_route().await;

        assert_eq!(app.lock().await.step, Step::Home);
        assert!(!controller.poller.lock().await.is_running());
    }

    #[tokio::test]
    async fn test_error_slot_clears_at_the_next_attempt() {
        let api = Arc::new(FakeApi::new(2));
        let (controller, app, _router, _tmp) = harness(Arc::clone(&api));

        api.fail_start.store(true, Ordering::SeqCst);
        controller.load_test_session(TestKind::Qi).await;
        assert!(app.lock().await.error.is_some());

        controller.dismiss_error().await;
        assert!(app.lock().await.error.is_none());

        api.fail_start.store(false, Ordering::SeqCst);
        controller.load_test_session(TestKind::Qi).await;
        assert!(app.lock().await.error.is_none());
    }

    #[tokio::test]
    async fn test_request_unlock_requires_a_teaser_preview() {
        let api = Arc::new(FakeApi::new(2));
        let (controller, app, _router, _tmp) = harness(api);

        // No result at all: nothing to unlock.
        app.lock().await.step = Step::Preview;
        controller.request_unlock().await;
        assert_eq!(app.lock().await.step, Step::Preview);

        // A complete result has nothing left to unlock either.
        {
            let mut app = app.lock().await;
            app.session.result = Some(TestResult {
                informacoes_completas: true,
                perfil: "Perfil".to_string(),
                frase: "Frase".to_string(),
                texto: None,
            });
        }
        controller.request_unlock().await;
        assert_eq!(app.lock().await.step, Step::Preview);
        assert!(!controller.poller.lock().await.is_running());
    }
}
