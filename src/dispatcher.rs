// src/dispatcher.rs
//! Routes control requests to the first platform adapter that recognises the
//! page and turns fill reports into user-facing outcomes.

use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::adapters::{default_adapters, PlatformAdapter};
use crate::config::AutofillConfig;
use crate::error::{AutofillError, PageError};
use crate::fill::FillOrchestrator;
use crate::mapper::{CvLocale, MapSettings};
use crate::page::{Banner, DomSnapshot, Page};
use crate::types::{
    Action, ActionOutcome, DetectOutcome, FailureReply, FillContext, FillOutcome,
    FormDetectedNotice, FormType,
};

pub const NOTHING_FILLED_MESSAGE: &str = "Nie udało się wypełnić formularza.";
pub const UNSUPPORTED_PAGE_MESSAGE: &str = "Nie znaleziono wspieranego formularza na tej stronie.";
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Nie można połączyć się ze stroną. Odśwież stronę i spróbuj ponownie.";

pub struct Dispatcher {
    adapters: Vec<Box<dyn PlatformAdapter>>,
    orchestrator: FillOrchestrator,
    locale: CvLocale,
    banner_display: Duration,
    banner_fade: Duration,
}

impl Dispatcher {
    /// Adapters are ordered by priority; equal priorities keep the given order.
    pub fn new(mut adapters: Vec<Box<dyn PlatformAdapter>>, orchestrator: FillOrchestrator) -> Self {
        adapters.sort_by_key(|a| a.priority());
        let defaults = AutofillConfig::default();
        Self {
            adapters,
            orchestrator,
            locale: defaults.cv_locale,
            banner_display: defaults.banner_display(),
            banner_fade: defaults.banner_fade(),
        }
    }

    pub fn from_config(config: &AutofillConfig) -> Self {
        let mut dispatcher = Self::new(
            default_adapters(),
            FillOrchestrator::with_interval(config.settle_interval()),
        );
        dispatcher.locale = config.cv_locale;
        dispatcher.banner_display = config.banner_display();
        dispatcher.banner_fade = config.banner_fade();
        dispatcher
    }

    /// Upper bound on how long `fill` can take on this page, if supported.
    pub fn worst_case_duration<P: Page + ?Sized>(&self, page: &P) -> Option<Duration> {
        let dom = page.snapshot().ok()?;
        let adapter = self.matching(&dom)?;
        Some(self.orchestrator.worst_case_duration(&adapter.locate(&dom)))
    }

    fn matching(&self, dom: &DomSnapshot) -> Option<&dyn PlatformAdapter> {
        self.adapters
            .iter()
            .find(|adapter| adapter.detect(dom))
            .map(|adapter| adapter.as_ref())
    }

    /// Platform detection that keeps unreachable pages distinct from pages
    /// without a supported form.
    pub fn try_detect<P: Page + ?Sized>(&self, page: &P) -> Result<DetectOutcome, PageError> {
        let dom = page.snapshot()?;
        let form_type = self
            .matching(&dom)
            .map(|adapter| adapter.form_type())
            .unwrap_or(FormType::Unknown);

        debug!("Detected form type {} on {}", form_type, page.url());
        Ok(DetectOutcome {
            detected: form_type != FormType::Unknown,
            form_type,
            url: page.url().to_string(),
        })
    }

    /// Like [`Dispatcher::try_detect`], reporting any failure as no form.
    pub fn detect<P: Page + ?Sized>(&self, page: &P) -> DetectOutcome {
        self.try_detect(page).unwrap_or_else(|e| {
            warn!("Cannot inspect page {}: {}", page.url(), e);
            DetectOutcome {
                detected: false,
                form_type: FormType::Unknown,
                url: page.url().to_string(),
            }
        })
    }

    /// Run one attempt with the first matching platform only. Never fails;
    /// every problem ends up in the returned outcome.
    pub async fn fill<P: Page + ?Sized>(&self, page: &mut P, context: &FillContext) -> FillOutcome {
        let dom = match page.snapshot() {
            Ok(dom) => dom,
            Err(PageError::NotReady(reason)) => return Self::transport_failure(&reason),
            Err(e) => {
                warn!("Fill aborted on {}: {}", page.url(), e);
                return failure(FormType::Unknown, &e.to_string());
            }
        };

        let Some(adapter) = self.matching(&dom) else {
            let reason = AutofillError::NoFormDetected {
                url: page.url().to_string(),
            };
            info!("{}", reason);
            return FillOutcome {
                success: false,
                filled_count: 0,
                form_type: FormType::Unknown,
                message: UNSUPPORTED_PAGE_MESSAGE.to_string(),
            };
        };

        let form_type = adapter.form_type();
        info!("Filling {} form on {}", form_type, page.url());

        let located = adapter.locate(&dom);
        for field in located.missing() {
            let reason = AutofillError::FieldNotFound {
                field: field.to_string(),
                form_type,
            };
            debug!("{}", reason);
        }

        let settings = MapSettings::current(self.locale);
        let values = (adapter.mapper())(&context.profile, &context.options, &settings);
        let report = self.orchestrator.fill(page, &located, &values).await;

        if !report.file_fields.is_empty() {
            info!("CV file must be attached manually ({} upload field(s))", report.file_fields.len());
        }

        FillOutcome {
            success: report.success(),
            filled_count: report.filled_count(),
            form_type,
            message: if report.success() {
                success_message(form_type)
            } else {
                NOTHING_FILLED_MESSAGE.to_string()
            },
        }
    }

    pub async fn run<P: Page + ?Sized>(&self, page: &mut P, action: &Action) -> ActionOutcome {
        match action {
            Action::DetectForm => match self.try_detect(page) {
                Ok(detected) => ActionOutcome::Detect(detected),
                Err(PageError::NotReady(reason)) => {
                    let outcome = Self::transport_failure(&reason);
                    ActionOutcome::Failed(FailureReply::new(outcome.message))
                }
                Err(e) => ActionOutcome::Failed(internal_failure(&e.to_string())),
            },
            Action::FillForm(context) => ActionOutcome::Fill(self.fill(page, context).await),
        }
    }

    /// Parse one inbound JSON control message and always produce a reply.
    pub async fn handle_message<P: Page + ?Sized>(&self, page: &mut P, raw: &str) -> Value {
        let action: Action = match serde_json::from_str(raw) {
            Ok(action) => action,
            Err(e) => {
                warn!("Rejected control message: {}", e);
                return reply(&internal_failure(&e.to_string()));
            }
        };

        let outcome = self.run(page, &action).await;
        serde_json::to_value(&outcome)
            .unwrap_or_else(|e| reply(&internal_failure(&e.to_string())))
    }

    /// Page-load hook: show the banner and build the notification when a
    /// supported form is present.
    pub fn announce<P: Page + ?Sized>(&self, page: &mut P) -> Option<FormDetectedNotice> {
        let detected = self.detect(page);
        self.announce_detected(page, &detected)
    }

    /// Banner and notification for an already computed detection.
    pub fn announce_detected<P: Page + ?Sized>(
        &self,
        page: &mut P,
        detected: &DetectOutcome,
    ) -> Option<FormDetectedNotice> {
        if !detected.detected {
            return None;
        }

        info!("{} form detected on {}", detected.form_type, detected.url);
        page.show_banner(Banner {
            text: format!(
                "✓ Formularz {} wykryty - użyj rozszerzenia CV AutoFill",
                detected.form_type
            ),
            display_for: self.banner_display,
            fade_out: self.banner_fade,
        });
        Some(FormDetectedNotice::new(detected.form_type, &detected.url))
    }

    /// Outcome reported when the page cannot be reached or is not ready.
    pub fn transport_failure(reason: &str) -> FillOutcome {
        warn!("{}", AutofillError::TransportFailure(reason.to_string()));
        FillOutcome {
            success: false,
            filled_count: 0,
            form_type: FormType::Unknown,
            message: TRANSPORT_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::from_config(&AutofillConfig::default())
    }
}

pub fn success_message(form_type: FormType) -> String {
    match form_type {
        FormType::SolidJobs | FormType::Unknown => "Formularz wypełniony pomyślnie!".to_string(),
        other => format!("Formularz {} wypełniony pomyślnie!", other),
    }
}

fn failure(form_type: FormType, description: &str) -> FillOutcome {
    FillOutcome {
        success: false,
        filled_count: 0,
        form_type,
        message: format!("Błąd podczas wypełniania: {}", description),
    }
}

fn internal_failure(description: &str) -> FailureReply {
    FailureReply::new(format!("Błąd podczas wypełniania: {}", description))
}

fn reply(failure: &FailureReply) -> Value {
    json!({
        "success": failure.success,
        "message": failure.message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LocatedFieldMap;
    use crate::fields::{FieldValue, SemanticField, ValueMap};
    use crate::mapper::FieldMapper;
    use crate::page::HtmlPage;
    use crate::types::{ApplicationOptions, Profile};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Probe {
        form_type: FormType,
        priority: u8,
        matches: bool,
        located: Arc<AtomicUsize>,
        mapper: FieldMapper,
    }

    impl Probe {
        fn new(form_type: FormType, priority: u8, matches: bool) -> (Self, Arc<AtomicUsize>) {
            let located = Arc::new(AtomicUsize::new(0));
            let probe = Self {
                form_type,
                priority,
                matches,
                located: located.clone(),
                mapper: first_name_only,
            };
            (probe, located)
        }
    }

    impl PlatformAdapter for Probe {
        fn form_type(&self) -> FormType {
            self.form_type
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        fn detect(&self, _dom: &DomSnapshot) -> bool {
            self.matches
        }

        fn locate(&self, dom: &DomSnapshot) -> LocatedFieldMap {
            self.located.fetch_add(1, Ordering::SeqCst);
            let mut map = LocatedFieldMap::default();
            map.insert(SemanticField::FirstName, dom.by_id("first"));
            map
        }

        fn mapper(&self) -> FieldMapper {
            self.mapper
        }
    }

    fn first_name_only(_: &Profile, _: &ApplicationOptions, _: &MapSettings) -> ValueMap {
        ValueMap::from([(SemanticField::FirstName, FieldValue::text("Jan"))])
    }

    fn must_not_map(_: &Profile, _: &ApplicationOptions, _: &MapSettings) -> ValueMap {
        panic!("mapper must not run on an unsupported page")
    }

    fn instant(adapters: Vec<Box<dyn PlatformAdapter>>) -> Dispatcher {
        Dispatcher::new(adapters, FillOrchestrator::with_interval(Duration::ZERO))
    }

    const SOLID_PAGE: &str = r#"
        <form id="enrollForm">
          <div><label>Imię i nazwisko</label><input name="fullName" id="name"></div>
          <input type="email" name="mail" id="email">
          <input type="file" name="cvFile" id="file">
        </form>"#;

    #[tokio::test]
    async fn test_only_first_matching_adapter_runs() {
        let (late, late_calls) = Probe::new(FormType::Traffit, 5, true);
        let (early, early_calls) = Probe::new(FormType::ERecruiter, 1, true);
        let dispatcher = instant(vec![Box::new(late), Box::new(early)]);
        let mut page = HtmlPage::parse("https://x.test", r#"<form><input id="first"></form>"#);

        let outcome = dispatcher.fill(&mut page, &FillContext::default()).await;

        assert_eq!(outcome.form_type, FormType::ERecruiter);
        assert_eq!(outcome.filled_count, 1);
        assert_eq!(outcome.message, "Formularz eRecruiter wypełniony pomyślnie!");
        assert_eq!(early_calls.load(Ordering::SeqCst), 1);
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_equal_priority_keeps_registration_order() {
        let (first, first_calls) = Probe::new(FormType::Traffit, 3, true);
        let (second, second_calls) = Probe::new(FormType::SolidJobs, 3, true);
        let dispatcher = instant(vec![Box::new(first), Box::new(second)]);
        let mut page = HtmlPage::parse("https://x.test", "<form></form>");

        let outcome = dispatcher.fill(&mut page, &FillContext::default()).await;

        assert_eq!(outcome.form_type, FormType::Traffit);
        assert!(!outcome.success);
        assert_eq!(outcome.message, NOTHING_FILLED_MESSAGE);
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_page_runs_no_locator_or_mapper() {
        let (mut probe, calls) = Probe::new(FormType::Traffit, 1, false);
        probe.mapper = must_not_map;
        let dispatcher = instant(vec![Box::new(probe)]);
        let mut page = HtmlPage::parse("https://example.com/jobs", r#"<form><input id="first"></form>"#);

        let detected = dispatcher.detect(&page);
        assert!(!detected.detected);
        assert_eq!(detected.form_type, FormType::Unknown);
        assert_eq!(detected.url, "https://example.com/jobs");

        let outcome = dispatcher.fill(&mut page, &FillContext::default()).await;
        assert!(!outcome.success);
        assert_eq!(outcome.form_type, FormType::Unknown);
        assert_eq!(outcome.message, UNSUPPORTED_PAGE_MESSAGE);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(page.events().is_empty());
    }

    #[tokio::test]
    async fn test_fill_solid_jobs_page() {
        let dispatcher = instant(default_adapters());
        let mut page = HtmlPage::parse("https://solid.jobs/offer/42", SOLID_PAGE);
        let profile =
            Profile::from_json(r#"{"basics": {"name": "Jan Kowalski", "email": "jan@example.com"}}"#)
                .unwrap();
        let context = FillContext::new(profile, ApplicationOptions::default());

        let outcome = dispatcher.fill(&mut page, &context).await;

        assert!(outcome.success);
        assert_eq!(outcome.form_type, FormType::SolidJobs);
        assert_eq!(outcome.filled_count, 2);
        assert_eq!(outcome.message, "Formularz wypełniony pomyślnie!");
        let dom = page.snapshot().unwrap();
        assert_eq!(page.value(dom.by_id("name").unwrap()).unwrap(), "Jan Kowalski");
        assert_eq!(page.value(dom.by_id("file").unwrap()).unwrap(), "");
    }

    #[tokio::test]
    async fn test_page_not_ready_is_transport_failure() {
        let dispatcher = instant(default_adapters());
        let mut page = HtmlPage::parse("https://solid.jobs/offer/42", SOLID_PAGE);
        page.mark_not_ready("document still loading");

        let outcome = dispatcher.fill(&mut page, &FillContext::default()).await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, TRANSPORT_FAILURE_MESSAGE);

        let detect = dispatcher.run(&mut page, &Action::DetectForm).await;
        assert_eq!(
            detect,
            ActionOutcome::Failed(FailureReply::new(TRANSPORT_FAILURE_MESSAGE))
        );

        for message in [
            r#"{"action": "detectForm"}"#,
            r#"{"action": "fillForm", "cvData": {"basics": {"email": "a@b.pl"}}}"#,
        ] {
            let reply = dispatcher.handle_message(&mut page, message).await;
            assert_eq!(reply["success"], false, "{}", message);
            assert_eq!(reply["message"], TRANSPORT_FAILURE_MESSAGE, "{}", message);
        }

        assert!(dispatcher.announce(&mut page).is_none());
        assert!(page.banners().is_empty());
        assert!(page.events().is_empty());
    }

    #[tokio::test]
    async fn test_fill_traffit_page() {
        let dispatcher = instant(default_adapters());
        let mut page = HtmlPage::parse(
            "https://billennium.traffit.com/public/an/abc",
            r#"
            <form>
              <div class="form-group"><label>Imię *</label><input type="text" id="first"></div>
              <div class="form-group"><label>Nazwisko *</label><input type="text" id="last"></div>
              <div class="form-group"><label for="mail">E-mail</label><input id="mail"></div>
              <input type="tel" name="candidate_phone" id="phone">
              <input name="linkedin_profile" id="li">
              <input name="salary_expectations" id="salary">
              <input type="file" id="cv">
              <label><input type="checkbox" id="gdpr"> I consent to the processing of my personal data</label>
              <input type="checkbox" id="future"><label for="future">I agree to further recruitment processes</label>
            </form>"#,
        );
        let profile = Profile::from_json(
            r#"{"basics": {
                "name": "Anna Maria Nowak",
                "email": "anna@example.com",
                "phone": "+48 600 100 200",
                "profiles": [{"network": "LinkedIn", "url": "https://linkedin.com/in/anowak"}]
            }}"#,
        )
        .unwrap();

        let outcome = dispatcher
            .fill(&mut page, &FillContext::new(profile, ApplicationOptions::default()))
            .await;

        // salary has no value and the file input stays manual
        assert_eq!(outcome.form_type, FormType::Traffit);
        assert_eq!(outcome.filled_count, 7);
        assert_eq!(outcome.message, "Formularz Traffit wypełniony pomyślnie!");
        let dom = page.snapshot().unwrap();
        assert_eq!(page.value(dom.by_id("last").unwrap()).unwrap(), "Maria Nowak");
        assert_eq!(page.value(dom.by_id("salary").unwrap()).unwrap(), "");
        assert!(page.is_checked(dom.by_id("future").unwrap()).unwrap());
    }

    #[tokio::test]
    async fn test_fill_erecruiter_page() {
        let dispatcher = instant(default_adapters());
        let mut page = HtmlPage::parse(
            "https://kariera.example.pl/oferta/17",
            r#"
            <form id="search"><input name="q" id="q"></form>
            <form class="erecruiter-apply">
              <fieldset><label>Imię</label><input name="FirstName" id="first"></fieldset>
              <fieldset><label>Nazwisko</label><input name="LastName" id="last"></fieldset>
              <input type="email" id="mail">
              <fieldset><label>Miejscowość</label><input name="City" id="city"></fieldset>
              <textarea name="CoverLetter" id="letter"></textarea>
              <label><input type="checkbox" id="rodo"> Wyrażam zgodę na przetwarzanie moich danych osobowych</label>
              <label><input type="checkbox" id="future"> Zgoda na udział w przyszłych rekrutacjach</label>
            </form>"#,
        );
        let profile = Profile::from_json(
            r#"{"basics": {
                "name": "Jan Kowalski",
                "email": "jan@example.com",
                "location": {"city": "Kraków"}
            }}"#,
        )
        .unwrap();
        let options = ApplicationOptions {
            agree_to_future_recruitment: Some(false),
            ..ApplicationOptions::default()
        };

        let outcome = dispatcher
            .fill(&mut page, &FillContext::new(profile, options))
            .await;

        // first, last, mail, city and the data processing consent
        assert_eq!(outcome.form_type, FormType::ERecruiter);
        assert_eq!(outcome.filled_count, 5);
        assert_eq!(outcome.message, "Formularz eRecruiter wypełniony pomyślnie!");
        let dom = page.snapshot().unwrap();
        assert_eq!(page.value(dom.by_id("city").unwrap()).unwrap(), "Kraków");
        assert_eq!(page.value(dom.by_id("q").unwrap()).unwrap(), "");
        assert!(!page.is_checked(dom.by_id("future").unwrap()).unwrap());
    }

    #[tokio::test]
    async fn test_handle_message_replies_to_every_request() {
        let dispatcher = instant(default_adapters());
        let mut page = HtmlPage::parse("https://solid.jobs/offer/42", SOLID_PAGE);

        let reply = dispatcher
            .handle_message(&mut page, r#"{"action": "detectForm"}"#)
            .await;
        assert_eq!(reply["detected"], true);
        assert_eq!(reply["formType"], "SOLID.jobs");
        assert_eq!(reply["url"], "https://solid.jobs/offer/42");

        let reply = dispatcher
            .handle_message(
                &mut page,
                r#"{"action": "fillForm", "cvData": {"basics": {"email": "a@b.pl"}}, "options": {}}"#,
            )
            .await;
        assert_eq!(reply["success"], true);
        assert_eq!(reply["filledCount"], 1);

        let reply = dispatcher.handle_message(&mut page, "{not json").await;
        assert_eq!(reply["success"], false);
        assert!(reply["message"]
            .as_str()
            .unwrap()
            .starts_with("Błąd podczas wypełniania: "));

        let reply = dispatcher
            .handle_message(&mut page, r#"{"action": "submitForm"}"#)
            .await;
        assert_eq!(reply["success"], false);
    }

    #[test]
    fn test_announce_shows_banner_only_for_supported_forms() {
        let dispatcher = Dispatcher::default();

        let mut page = HtmlPage::parse("https://solid.jobs/offer/42", SOLID_PAGE);
        let notice = dispatcher.announce(&mut page).unwrap();
        assert_eq!(notice.action, "formDetected");
        assert_eq!(notice.form_type, FormType::SolidJobs);
        assert_eq!(
            page.banners(),
            &[Banner {
                text: "✓ Formularz SOLID.jobs wykryty - użyj rozszerzenia CV AutoFill".to_string(),
                display_for: Duration::from_secs(5),
                fade_out: Duration::from_millis(500),
            }]
        );

        let mut other = HtmlPage::parse("https://example.com", "<form></form>");
        assert!(dispatcher.announce(&mut other).is_none());
        assert!(other.banners().is_empty());
    }

    #[test]
    fn test_announce_detected_reuses_given_outcome() {
        // This adapter never matches, so a banner can only come from the
        // outcome passed in.
        let (probe, _) = Probe::new(FormType::Traffit, 1, false);
        let dispatcher = instant(vec![Box::new(probe)]);
        let mut page = HtmlPage::parse("https://billennium.traffit.com/public/an/1", "<form></form>");
        let detected = DetectOutcome {
            detected: true,
            form_type: FormType::Traffit,
            url: page.url().to_string(),
        };

        let notice = dispatcher.announce_detected(&mut page, &detected).unwrap();

        assert_eq!(notice.form_type, FormType::Traffit);
        assert_eq!(page.banners().len(), 1);
    }

    #[test]
    fn test_worst_case_duration_for_supported_page() {
        let dispatcher = Dispatcher::new(
            default_adapters(),
            FillOrchestrator::with_interval(Duration::from_millis(50)),
        );
        let page = HtmlPage::parse("https://solid.jobs/offer/42", SOLID_PAGE);
        // name, email and file input located
        assert_eq!(
            dispatcher.worst_case_duration(&page),
            Some(Duration::from_millis(750))
        );
        let other = HtmlPage::parse("https://example.com", "<form></form>");
        assert_eq!(dispatcher.worst_case_duration(&other), None);
    }

    #[test]
    fn test_transport_failure_message() {
        let outcome = Dispatcher::transport_failure("no receiver");
        assert!(!outcome.success);
        assert_eq!(outcome.message, TRANSPORT_FAILURE_MESSAGE);
    }
}
