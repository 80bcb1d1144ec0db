// src/adapters/erecruiter.rs
//! eRecruiter application forms (`*.erecruiter.pl` and embedded widgets)

use super::locator::{first_form, locate_fields, Attr, FieldSpec, Rule, Strategy, Test};
use super::{LocatedFieldMap, PlatformAdapter};
use crate::fields::SemanticField as F;
use crate::mapper::{self, FieldMapper};
use crate::page::{DomSnapshot, ElementHandle};
use crate::types::FormType;

const HOST_MARKER: &str = "erecruiter.pl";
const FORM_MARKER: &str = "erecruiter";

const INPUT: &[&str] = &["input"];
const TEXTAREA: &[&str] = &["textarea"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        field: F::FirstName,
        strategy: Strategy::Labelled {
            labels: &["imię", "first name"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("firstname"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("imie"))]),
            ],
        },
    },
    FieldSpec {
        field: F::LastName,
        strategy: Strategy::Labelled {
            labels: &["nazwisko", "last name", "surname"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("lastname"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("nazwisko"))]),
            ],
        },
    },
    FieldSpec {
        field: F::Email,
        strategy: Strategy::Labelled {
            labels: &["e-mail", "email"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Type, Test::Equals("email"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("mail"))]),
            ],
        },
    },
    FieldSpec {
        field: F::Phone,
        strategy: Strategy::Labelled {
            labels: &["telefon", "phone"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Type, Test::Equals("tel"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("phone"))]),
            ],
        },
    },
    FieldSpec {
        field: F::Location,
        strategy: Strategy::Labelled {
            labels: &["miejscowość", "miasto", "miejsce zamieszkania", "city"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("city"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("miasto"))]),
            ],
        },
    },
    FieldSpec {
        field: F::LinkedInUrl,
        strategy: Strategy::Labelled {
            labels: &["linkedin", "profil zawodowy"],
            rules: &[Rule::new(INPUT, &[(Attr::Name, Test::Contains("linkedin"))])],
        },
    },
    FieldSpec {
        field: F::SalaryExpectations,
        strategy: Strategy::Labelled {
            labels: &["oczekiwania finansowe", "wynagrodzeni", "salary"],
            rules: &[Rule::new(INPUT, &[(Attr::Name, Test::Contains("salary"))])],
        },
    },
    FieldSpec {
        field: F::NoticePeriod,
        strategy: Strategy::Labelled {
            labels: &["okres wypowiedzenia", "notice period"],
            rules: &[Rule::new(
                &["input", "select"],
                &[(Attr::Name, Test::Contains("notice"))],
            )],
        },
    },
    FieldSpec {
        field: F::CoverLetter,
        strategy: Strategy::Labelled {
            labels: &["list motywacyjny", "cover letter"],
            rules: &[Rule::new(TEXTAREA, &[(Attr::Name, Test::Contains("letter"))])],
        },
    },
    FieldSpec {
        field: F::AdditionalInfo,
        strategy: Strategy::Labelled {
            labels: &["dodatkowe informacje", "uwagi", "additional information"],
            rules: &[Rule::new(TEXTAREA, &[(Attr::Name, Test::Contains("additional"))])],
        },
    },
    FieldSpec {
        field: F::CvFile,
        strategy: Strategy::Structural(&[Rule::new(INPUT, &[(Attr::Type, Test::Equals("file"))])]),
    },
    FieldSpec {
        field: F::DataProcessingConsent,
        strategy: Strategy::Checkbox {
            phrase: "danych osobowych",
            rules: &[Rule::new(
                INPUT,
                &[
                    (Attr::Type, Test::Equals("checkbox")),
                    (Attr::Name, Test::Contains("rodo")),
                ],
            )],
        },
    },
    FieldSpec {
        field: F::FutureRecruitmentConsent,
        strategy: Strategy::Checkbox {
            phrase: "przyszłych",
            rules: &[Rule::new(
                INPUT,
                &[
                    (Attr::Type, Test::Equals("checkbox")),
                    (Attr::Name, Test::Contains("future")),
                ],
            )],
        },
    },
];

pub struct ERecruiterAdapter;

impl ERecruiterAdapter {
    /// A form branded by id or class, e.g. `<form id="eRecruiterApplyForm">`.
    fn branded_form(dom: &DomSnapshot) -> Option<ElementHandle> {
        dom.by_tag("form")
            .find(|(_, el)| {
                el.id().is_some_and(|id| id.to_lowercase().contains(FORM_MARKER))
                    || el.has_class_containing(FORM_MARKER)
            })
            .map(|(h, _)| h)
    }
}

impl PlatformAdapter for ERecruiterAdapter {
    fn form_type(&self) -> FormType {
        FormType::ERecruiter
    }

    fn priority(&self) -> u8 {
        30
    }

    fn detect(&self, dom: &DomSnapshot) -> bool {
        if Self::branded_form(dom).is_some() {
            return true;
        }
        dom.hostname().contains(HOST_MARKER) && first_form(dom).is_some()
    }

    fn locate(&self, dom: &DomSnapshot) -> LocatedFieldMap {
        let scope = Self::branded_form(dom).or_else(|| first_form(dom));
        locate_fields(dom, scope, FIELDS)
    }

    fn mapper(&self) -> FieldMapper {
        mapper::erecruiter::map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <form id="search"><input name="q" id="q"></form>
        <form class="erecruiter-apply">
          <fieldset><label>Imię</label><input name="FirstName" id="first"></fieldset>
          <fieldset><label>Nazwisko</label><input name="LastName" id="last"></fieldset>
          <input type="email" id="mail">
          <fieldset><label>Miejscowość</label><input name="City" id="city"></fieldset>
          <textarea name="CoverLetter" id="letter"></textarea>
          <label><input type="checkbox" id="rodo"> Wyrażam zgodę na przetwarzanie moich danych osobowych</label>
          <label><input type="checkbox" id="future"> Zgoda na udział w przyszłych rekrutacjach</label>
        </form>"#;

    #[test]
    fn test_detect_by_branded_form_or_host() {
        assert!(ERecruiterAdapter.detect(&DomSnapshot::parse("https://careers.example.com", PAGE)));
        assert!(ERecruiterAdapter.detect(&DomSnapshot::parse(
            "https://system.erecruiter.pl/FormTemplates/RecruitmentForm.aspx",
            "<form></form>"
        )));
        assert!(!ERecruiterAdapter.detect(&DomSnapshot::parse(
            "https://careers.example.com",
            "<form id='search'></form>"
        )));
    }

    #[test]
    fn test_locate_within_branded_form() {
        let dom = DomSnapshot::parse("https://careers.example.com", PAGE);
        let located = ERecruiterAdapter.locate(&dom);

        for (field, id) in [
            (F::FirstName, "first"),
            (F::LastName, "last"),
            (F::Email, "mail"),
            (F::Location, "city"),
            (F::CoverLetter, "letter"),
            (F::DataProcessingConsent, "rodo"),
            (F::FutureRecruitmentConsent, "future"),
        ] {
            assert_eq!(located.get(field), dom.by_id(id), "{}", field);
        }
        assert!(located.get(F::CvFile).is_none());
        assert!(located.get(F::Phone).is_none());
    }
}
