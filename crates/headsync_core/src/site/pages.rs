//! Literal head content for each routed view.
//!
//! Canonical paths are attached by `PageView::directive`.

use crate::model::directive::{MetadataDirective, StructuredData};
use serde::Serialize;

const PERSON_NAME: &str = "Ahmed Dawood Al-Dulaimi";
const LINKEDIN_URL: &str = "https://www.linkedin.com/in/ahmed-dawood-salman";
const SCHEMA_CONTEXT: &str = "https://schema.org";

pub fn landing() -> MetadataDirective {
    MetadataDirective::new(
        format!("{PERSON_NAME} — Product Manager"),
        "PMP & PSM certified Product Manager building software products and programs. \
         Explore About, Resume, and Work samples.",
    )
}

pub fn about() -> MetadataDirective {
    MetadataDirective::new(
        format!("About {PERSON_NAME}"),
        "PMP & PSM certified Product Manager with 10+ years leading software products, \
         agile delivery, and cross-functional teams.",
    )
    .with_structured_data(StructuredData::from_serialize(&person_record()))
}

pub fn resume() -> MetadataDirective {
    MetadataDirective::new(
        format!("Resume — {PERSON_NAME}"),
        "Product & Program Manager with PMP, PSM; 10+ years in software, agile delivery, \
         and digital transformation.",
    )
}

pub fn work() -> MetadataDirective {
    MetadataDirective::new(
        format!("Sample of Work — {PERSON_NAME}"),
        "Selected projects spanning program management, product development, and platform \
         integrations.",
    )
    .with_structured_data(StructuredData::from_serialize(&work_list()))
}

#[derive(Debug, Serialize)]
struct Person {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'static str,
    #[serde(rename = "jobTitle")]
    job_title: &'static str,
    email: &'static str,
    url: &'static str,
    address: PostalAddress,
    #[serde(rename = "sameAs")]
    same_as: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct PostalAddress {
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(rename = "addressRegion")]
    region: &'static str,
    #[serde(rename = "addressCountry")]
    country: &'static str,
}

#[derive(Debug, Serialize)]
struct ItemList {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(rename = "itemListElement")]
    items: Vec<ListItem>,
}

#[derive(Debug, Serialize)]
struct ListItem {
    #[serde(rename = "@type")]
    kind: &'static str,
    position: u32,
    name: &'static str,
    description: &'static str,
}

fn person_record() -> Person {
    Person {
        context: SCHEMA_CONTEXT,
        kind: "Person",
        name: PERSON_NAME,
        job_title: "Product Manager, Program Manager, Tech Entrepreneur",
        email: "mailto:ahmed.d.aldulaimi@gmail.com",
        url: LINKEDIN_URL,
        address: PostalAddress {
            kind: "PostalAddress",
            region: "CA",
            country: "USA",
        },
        same_as: vec![LINKEDIN_URL],
    }
}

fn work_list() -> ItemList {
    let entries = [
        (
            "CreativeWork",
            "UCSD Tech & Engineering Programs",
            "Program management for tech offerings; leveraging feedback to improve delivery \
             and launch AI/ML programs.",
        ),
        (
            "SoftwareApplication",
            "ERP/CRM Integrations for Startups (Makers of Baghdad)",
            "API integrations and backend management across ERP, CRM, Payments, and HR systems.",
        ),
        (
            "CreativeWork",
            "IoT Kids LMS & Mobile Learning App",
            "Led the pivot to e‑learning; designed and shipped a scalable LMS and mobile \
             learning experience.",
        ),
        (
            "SoftwareApplication",
            "Cosmos Oasis Booking & Payments",
            "Digitized operations with booking, customer management, and payment gateway \
             integration.",
        ),
    ];

    ItemList {
        context: SCHEMA_CONTEXT,
        kind: "ItemList",
        items: entries
            .into_iter()
            .zip(1..)
            .map(|((kind, name, description), position)| ListItem {
                kind,
                position,
                name,
                description,
            })
            .collect(),
    }
}
