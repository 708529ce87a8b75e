// benches/classify.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tagalog_scrape::config::{PosMatch, ScraperConfig};
use tagalog_scrape::data::RawPage;
use tagalog_scrape::scrape::extract_records;
use tagalog_scrape::specs::FieldClassifier;

/// A listing page shaped like the live site: 50 word groups plus a pager.
fn synthetic_page() -> RawPage {
    let defs = [
        "n. embrace; hug",
        "(niyayakap, niyakap, yayakapin) v., inf. 1. embrace; 2. hug",
        "adj. beautiful; pretty",
        "pron. he; she",
        "fig. by ext. something that is hard to explain",
    ];
    let mut html = String::from("<html><head><script>var x = 1;</script></head><body>");
    for i in 0..50 {
        html.push_str(&format!(
            r#"<div class="word-group"><div class="word"><a href="/word/salita{i}/"><h2 class="word-entry">salita{i}</h2></a></div><div class="definition"><p>{}</p></div></div>"#,
            defs[i % defs.len()]
        ));
    }
    html.push_str(r#"<a title="Last &raquo;" href="/list/s/37/">Last</a></body></html>"#);
    RawPage::new("https://tagalog.pinoydictionary.com/list/s/", html)
}

fn bench_classify(c: &mut Criterion) {
    let page = synthetic_page();

    for mode in [PosMatch::Anywhere, PosMatch::Standalone] {
        let config = ScraperConfig { pos_match: mode, ..ScraperConfig::default() };
        let classifier = FieldClassifier::from_config(&config);
        c.bench_function(&format!("extract_{mode:?}").to_lowercase(), |b| {
            b.iter(|| {
                let records = extract_records(black_box(&page), &config, &classifier);
                black_box(records.len())
            })
        });
    }
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
