//! Rule evaluators
//!
//! Every evaluator is a total function from (part of) the crawl result to a
//! single [`Finding`](crate::finding::Finding). They share no state and can
//! run in any order.

pub mod content;
pub mod crawlers;
pub mod indexing;
pub mod meta;
pub mod policy_files;
pub mod structured_data;

pub use content::{
    check_content_freshness, check_content_structure, check_faq, check_heading_hierarchy,
    check_server_rendering,
};
pub use crawlers::{check_ai_crawler_access, check_robots_txt};
pub use indexing::check_indexing;
pub use meta::{check_ai_directives, check_meta_descriptions, check_open_graph};
pub use policy_files::{
    check_ai_policy, check_humans_txt, check_llms_full_txt, check_llms_txt, check_manifest,
    check_security_txt, check_sitemap, check_tdmrep,
};
pub use structured_data::check_structured_data;
