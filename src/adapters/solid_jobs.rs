// src/adapters/solid_jobs.rs
//! SOLID.jobs application form (`#enrollForm`)

use super::locator::{first_form, locate_fields, Attr, FieldSpec, Rule, Strategy, Test};
use super::{LocatedFieldMap, PlatformAdapter};
use crate::fields::SemanticField as F;
use crate::mapper::{self, FieldMapper};
use crate::page::{DomSnapshot, ElementHandle};
use crate::types::FormType;

const ROOT_FORM_ID: &str = "enrollForm";
const HOST: &str = "solid.jobs";

const INPUT: &[&str] = &["input"];
const TEXTAREA: &[&str] = &["textarea"];
const CHOICE: &[&str] = &["select", "input"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        field: F::FullName,
        strategy: Strategy::Labelled {
            labels: &["imię i nazwisko", "full name", "name and surname"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Equals("fullName"))]),
                Rule::new(INPUT, &[(Attr::Placeholder, Test::Contains("imię"))]),
                Rule::new(INPUT, &[(Attr::Placeholder, Test::Contains("nazwisko"))]),
            ],
        },
    },
    FieldSpec {
        field: F::Email,
        strategy: Strategy::Labelled {
            labels: &["adres e-mail", "e-mail", "email"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Equals("email"))]),
                Rule::new(INPUT, &[(Attr::Type, Test::Equals("email"))]),
                Rule::new(INPUT, &[(Attr::Placeholder, Test::Contains("e-mail"))]),
            ],
        },
    },
    FieldSpec {
        field: F::Phone,
        strategy: Strategy::Labelled {
            labels: &["numer telefonu", "telefon", "phone"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Equals("phone"))]),
                Rule::new(INPUT, &[(Attr::Type, Test::Equals("tel"))]),
                Rule::new(INPUT, &[(Attr::Placeholder, Test::Contains("telefon"))]),
            ],
        },
    },
    FieldSpec {
        field: F::EmploymentType,
        strategy: Strategy::Labelled {
            labels: &["forma zatrudnienia", "rodzaj umowy", "employment type", "contract type"],
            rules: &[Rule::new(CHOICE, &[(Attr::Name, Test::Equals("employmentType"))])],
        },
    },
    FieldSpec {
        field: F::ExpectedSalary,
        strategy: Strategy::Labelled {
            labels: &["oczekiwania finansowe", "oczekiwane wynagrodzenie", "expected salary"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Equals("expectedSalary"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Equals("salary"))]),
                Rule::new(INPUT, &[(Attr::Placeholder, Test::Contains("wynagrodzeni"))]),
            ],
        },
    },
    FieldSpec {
        field: F::SalaryCurrency,
        strategy: Strategy::Labelled {
            labels: &["waluta", "currency"],
            rules: &[
                Rule::new(&["select"], &[(Attr::Name, Test::Equals("currency"))]),
                Rule::new(&["select"], &[(Attr::Name, Test::Equals("salaryCurrency"))]),
            ],
        },
    },
    FieldSpec {
        field: F::AvailabilityDate,
        strategy: Strategy::Labelled {
            labels: &["kiedy możesz zacząć", "dostępność", "availability", "start date"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Equals("availabilityDate"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Equals("startDate"))]),
                Rule::new(INPUT, &[(Attr::Placeholder, Test::Contains("zacząć"))]),
            ],
        },
    },
    FieldSpec {
        field: F::NoticePeriod,
        strategy: Strategy::Labelled {
            labels: &["okres wypowiedzenia", "notice period"],
            rules: &[Rule::new(CHOICE, &[(Attr::Name, Test::Contains("notice"))])],
        },
    },
    FieldSpec {
        field: F::Location,
        strategy: Strategy::Labelled {
            labels: &["lokalizacja", "miejsce zamieszkania", "location"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("location"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("city"))]),
            ],
        },
    },
    FieldSpec {
        field: F::RemoteWork,
        strategy: Strategy::Checkbox {
            phrase: "zdaln",
            rules: &[Rule::new(
                INPUT,
                &[
                    (Attr::Type, Test::Equals("checkbox")),
                    (Attr::Name, Test::Contains("remote")),
                ],
            )],
        },
    },
    FieldSpec {
        field: F::LinkedInUrl,
        strategy: Strategy::Labelled {
            labels: &["linkedin"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Equals("linkedIn"))]),
                Rule::new(INPUT, &[(Attr::Placeholder, Test::Contains("linkedin"))]),
            ],
        },
    },
    FieldSpec {
        field: F::PortfolioUrl,
        strategy: Strategy::Labelled {
            labels: &["portfolio", "strona www", "website"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Equals("portfolio"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Equals("website"))]),
                Rule::new(INPUT, &[(Attr::Placeholder, Test::Contains("portfolio"))]),
            ],
        },
    },
    FieldSpec {
        field: F::Skills,
        strategy: Strategy::Labelled {
            labels: &["umiejętności", "technologie", "skills"],
            rules: &[Rule::new(&["input", "textarea"], &[(Attr::Name, Test::Contains("skill"))])],
        },
    },
    FieldSpec {
        field: F::ExperienceYears,
        strategy: Strategy::Labelled {
            labels: &["lat doświadczenia", "lata doświadczenia", "years of experience"],
            rules: &[Rule::new(INPUT, &[(Attr::Name, Test::Contains("experience"))])],
        },
    },
    FieldSpec {
        field: F::CvText,
        strategy: Strategy::Labelled {
            labels: &["treść cv", "cv w formie tekstowej", "resume text"],
            rules: &[
                Rule::new(TEXTAREA, &[(Attr::Name, Test::Equals("cv"))]),
                Rule::new(TEXTAREA, &[(Attr::Name, Test::Equals("resume"))]),
            ],
        },
    },
    FieldSpec {
        field: F::CoverLetter,
        strategy: Strategy::Labelled {
            labels: &["list motywacyjny", "cover letter", "motivation letter"],
            rules: &[
                Rule::new(TEXTAREA, &[(Attr::Name, Test::Equals("coverLetter"))]),
                Rule::new(TEXTAREA, &[(Attr::Name, Test::Equals("motivationLetter"))]),
                Rule::new(TEXTAREA, &[(Attr::Placeholder, Test::Contains("list motywacyjny"))]),
            ],
        },
    },
    FieldSpec {
        field: F::AdditionalInfo,
        strategy: Strategy::Labelled {
            labels: &["dodatkowe informacje", "additional information"],
            rules: &[Rule::new(TEXTAREA, &[(Attr::Name, Test::Contains("additional"))])],
        },
    },
    FieldSpec {
        field: F::CvFile,
        strategy: Strategy::Structural(&[
            Rule::new(
                INPUT,
                &[(Attr::Type, Test::Equals("file")), (Attr::Name, Test::Contains("cv"))],
            ),
            Rule::new(
                INPUT,
                &[(Attr::Type, Test::Equals("file")), (Attr::Accept, Test::Contains("pdf"))],
            ),
        ]),
    },
    FieldSpec {
        field: F::CookiesConsent,
        strategy: Strategy::Checkbox {
            phrase: "cookie",
            rules: &[Rule::new(
                INPUT,
                &[
                    (Attr::Type, Test::Equals("checkbox")),
                    (Attr::Name, Test::Contains("cookie")),
                ],
            )],
        },
    },
    FieldSpec {
        field: F::DataProcessingConsent,
        strategy: Strategy::Checkbox {
            phrase: "przetwarzanie",
            rules: &[
                Rule::new(
                    INPUT,
                    &[
                        (Attr::Type, Test::Equals("checkbox")),
                        (Attr::Name, Test::Contains("consent")),
                    ],
                ),
                Rule::new(
                    INPUT,
                    &[
                        (Attr::Type, Test::Equals("checkbox")),
                        (Attr::Name, Test::Contains("rodo")),
                    ],
                ),
            ],
        },
    },
];

pub struct SolidJobsAdapter;

impl SolidJobsAdapter {
    fn root_form(dom: &DomSnapshot) -> Option<ElementHandle> {
        dom.by_id(ROOT_FORM_ID)
            .filter(|h| dom.get(*h).is_some_and(|el| el.tag == "form"))
    }
}

impl PlatformAdapter for SolidJobsAdapter {
    fn form_type(&self) -> FormType {
        FormType::SolidJobs
    }

    fn priority(&self) -> u8 {
        10
    }

    fn detect(&self, dom: &DomSnapshot) -> bool {
        if Self::root_form(dom).is_some() {
            return true;
        }
        let host = dom.hostname();
        (host == HOST || host.ends_with(".solid.jobs")) && first_form(dom).is_some()
    }

    fn locate(&self, dom: &DomSnapshot) -> LocatedFieldMap {
        let scope = Self::root_form(dom).or_else(|| first_form(dom));
        locate_fields(dom, scope, FIELDS)
    }

    fn mapper(&self) -> FieldMapper {
        mapper::solid_jobs::map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <form id="enrollForm">
            <div><label>Imię i nazwisko</label><input name="fullName" id="name"></div>
            <input type="email" name="mail" id="email">
            <input type="tel" id="phone">
            <div><label for="emp">Forma zatrudnienia</label>
              <select id="emp" name="employmentType"><option>UoP</option><option>B2B</option></select></div>
            <input name="salary" id="salary">
            <select name="currency" id="currency"><option>PLN netto</option><option>PLN brutto</option></select>
            <input name="linkedin" placeholder="Link do profilu LinkedIn" id="li">
            <textarea name="cv" id="cvtext"></textarea>
            <input type="file" name="cvFile" accept=".pdf" id="file">
            <label><input type="checkbox" name="marketing" id="agree"> Wyrażam zgodę na przetwarzanie danych</label>
            <input type="checkbox" name="cookiePolicy" id="cookies">
          </form>
        </body></html>"#;

    #[test]
    fn test_detect_by_root_form_or_host() {
        assert!(SolidJobsAdapter.detect(&DomSnapshot::parse("https://example.com/apply", PAGE)));
        assert!(SolidJobsAdapter.detect(&DomSnapshot::parse(
            "https://solid.jobs/offer/123",
            "<form id='other'></form>"
        )));
        assert!(!SolidJobsAdapter.detect(&DomSnapshot::parse(
            "https://billennium.traffit.com/public/an/1",
            "<form></form>"
        )));
        assert!(!SolidJobsAdapter.detect(&DomSnapshot::parse("https://solid.jobs/", "<div></div>")));
    }

    #[test]
    fn test_locate() {
        let dom = DomSnapshot::parse("https://solid.jobs/offer/1", PAGE);
        let located = SolidJobsAdapter.locate(&dom);

        for (field, id) in [
            (F::FullName, "name"),
            (F::Email, "email"),
            (F::Phone, "phone"),
            (F::EmploymentType, "emp"),
            (F::ExpectedSalary, "salary"),
            (F::SalaryCurrency, "currency"),
            (F::LinkedInUrl, "li"),
            (F::CvText, "cvtext"),
            (F::CvFile, "file"),
            (F::DataProcessingConsent, "agree"),
            (F::CookiesConsent, "cookies"),
        ] {
            assert_eq!(located.get(field), dom.by_id(id), "{}", field);
        }
        assert!(located.missing().contains(&F::CoverLetter));
        assert!(located.missing().contains(&F::RemoteWork));
    }
}
