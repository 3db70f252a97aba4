pub mod distractor_classifier;
pub mod form_client;
pub mod form_payload;
pub mod link_presenter;
pub mod quiz_sampler;
pub mod replacement_catalog;
pub mod replacement_selector;
pub mod score_aggregator;
pub mod warn_writer;

pub use distractor_classifier::{DistractorClassifier, PhraseBlocklist};
pub use form_client::{FormTransport, HttpFormClient};
pub use form_payload::{FormEndpoints, FormPayload, Submitter};
pub use link_presenter::{BrowserPresenter, ConsolePresenter, FallbackPresenter, LinkPresenter};
pub use quiz_sampler::{sample_quiz, SampledQuestion};
pub use replacement_selector::{LevelBuckets, Predicate, ReplacementTable, Rule, Selection};
pub use score_aggregator::{aggregate_domains, global_score, tally_domains, DomainResults, DomainScore};
pub use warn_writer::WarnWriter;
