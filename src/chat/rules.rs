//! Pattern rule table for the chat assistant.
//!
//! An ordered list of (predicate, canned reply) rules over normalized
//! (lowercased, trimmed) text. Ordering is load-bearing: the dispatcher
//! takes the first match, so narrower rules sit above broader ones that
//! would shadow them — the pasted-URL rule precedes the HTTPS rules, and
//! "https + safe" precedes bare "https".

use regex::Regex;

/// One predicate alternative over normalized text.
#[derive(Debug, Clone)]
pub enum Match {
    /// Every substring must be present.
    AllOf(Vec<&'static str>),
    /// At least one substring must be present.
    AnyOf(Vec<&'static str>),
    /// Input starts with one of these prefixes.
    PrefixAny(Vec<&'static str>),
    /// Compiled regex, used for boundary-word matching.
    Word(Regex),
}

impl Match {
    fn matches(&self, text: &str) -> bool {
        match self {
            Match::AllOf(subs) => subs.iter().all(|s| text.contains(s)),
            Match::AnyOf(subs) => subs.iter().any(|s| text.contains(s)),
            Match::PrefixAny(prefixes) => prefixes.iter().any(|p| text.starts_with(p)),
            Match::Word(regex) => regex.is_match(text),
        }
    }
}

/// A (predicate, reply) rule. The rule fires if any alternative in `when`
/// matches.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: &'static str,
    pub when: Vec<Match>,
    pub reply: &'static str,
}

impl Rule {
    pub fn matches(&self, text: &str) -> bool {
        self.when.iter().any(|m| m.matches(text))
    }
}

fn rule(name: &'static str, when: Vec<Match>, reply: &'static str) -> Rule {
    Rule { name, when, reply }
}

fn all(subs: &[&'static str]) -> Match {
    Match::AllOf(subs.to_vec())
}

fn any(subs: &[&'static str]) -> Match {
    Match::AnyOf(subs.to_vec())
}

/// Build the full topic table, in evaluation order. Constructed once at
/// startup and never mutated.
pub fn default_rules() -> Vec<Rule> {
    vec![
        // ── Greetings / small talk ──────────────────────────────────────
        rule(
            "greeting",
            vec![Match::Word(
                Regex::new(r"(^|\b)(hi|hello|hey|yo|hola)\b").expect("greeting regex"),
            )],
            "Hello! Ask me anything about URLs, phishing detection, HTTPS, zero-day attacks, \
             or our ML-based system.",
        ),
        rule(
            "about_assistant",
            vec![any(&["who are you", "what can you do"])],
            "I'm a rule-based assistant for this project. I explain concepts like phishing, \
             URLs, HTTPS, zero-day attacks, semantic intention mapping, and how our detection \
             model works.",
        ),
        // ── Pasted URL ──────────────────────────────────────────────────
        // Sits above the HTTPS rules: a pasted https:// link should reach
        // the detection page, not the HTTPS explainer.
        rule(
            "pasted_url",
            vec![
                Match::PrefixAny(vec!["http://", "https://"]),
                any(&[".com", ".net", ".org"]),
            ],
            "You shared something that looks like a URL. To analyze it properly, please use \
             our Detection Page, which will run it through the ML model and show a prediction \
             with a confidence score.",
        ),
        // ── URL basics ──────────────────────────────────────────────────
        rule(
            "url_parts",
            vec![any(&["parts of url", "components of url"])],
            "A URL has several parts: protocol (http/https), domain (example.com), optional \
             subdomain (login.example.com), path (/login), and optional query parameters \
             (?id=123).",
        ),
        rule(
            "domain_name",
            vec![all(&["domain name"])],
            "A domain name is the human-readable name of a website, such as google.com. It \
             maps to an IP address where the website is hosted.",
        ),
        rule(
            "subdomain",
            vec![all(&["subdomain"])],
            "A subdomain is a subdivision of a main domain. For example, in \
             login.example.com, 'login' is a subdomain of example.com.",
        ),
        rule(
            "ip_in_url",
            vec![all(&["ip address"])],
            "Some URLs use an IP address instead of a domain name, like http://192.168.1.1. \
             Phishing URLs sometimes use raw IPs to hide their identity.",
        ),
        rule(
            "url_definition",
            vec![all(&["what is url"]), all(&["url", "meaning"])],
            "A URL (Uniform Resource Locator) is the address of a resource on the internet, \
             like https://example.com. It typically contains protocol, domain name, path, and \
             optional query parameters.",
        ),
        // ── HTTPS / transport security ──────────────────────────────────
        rule(
            "https_not_automatically_safe",
            vec![all(&["https", "safe"])],
            "HTTPS means the connection is encrypted, but it does NOT guarantee the site \
             itself is safe. Many phishing sites also use HTTPS. Always verify the domain \
             name.",
        ),
        rule(
            "ssl_tls",
            vec![any(&["ssl certificate", "tls"])],
            "An SSL/TLS certificate enables HTTPS and proves control over a domain. However, \
             attackers can also obtain certificates for fake domains, so SSL alone does not \
             guarantee legitimacy.",
        ),
        rule(
            "https_definition",
            vec![all(&["https"])],
            "HTTPS is a secure version of HTTP that encrypts the communication between your \
             browser and the website using SSL/TLS.",
        ),
        // ── Phishing basics ─────────────────────────────────────────────
        rule(
            "phishing_definition",
            vec![all(&["what is phishing"]), all(&["phishing", "meaning"])],
            "Phishing is a cyber attack where attackers impersonate legitimate websites, \
             emails or URLs to trick users into revealing sensitive information such as \
             passwords, OTPs, or bank details.",
        ),
        rule(
            "phishing_types",
            vec![any(&["types of phishing", "kinds of phishing"])],
            "Common phishing types include: email phishing, URL phishing, SMS phishing \
             (smishing), voice phishing (vishing), and spear phishing targeting specific \
             individuals.",
        ),
        rule(
            "phishing_danger",
            vec![all(&["phishing", "dangerous"])],
            "Phishing is dangerous because it can lead to financial loss, data theft, account \
             hijacking, identity theft, and long-term security breaches.",
        ),
        // ── Phishing URL patterns ───────────────────────────────────────
        rule(
            "suspicious_url_signs",
            vec![
                any(&["suspicious url", "phishing url indicators"]),
                all(&["identify", "suspicious"]),
            ],
            "Suspicious URLs often have misspelled domains, extra or strange subdomains, too \
             many special characters, misleading keywords like 'login', 'secure', 'verify', \
             and sometimes use URL shorteners to hide the real address.",
        ),
        rule(
            "suspicious_keywords",
            vec![any(&["suspicious keywords", "keywords in phishing urls"])],
            "Common suspicious keywords in phishing URLs include: login, secure, verify, \
             update, account, confirm, free, bonus, reward. When combined with brand names, \
             they are often phishing indicators.",
        ),
        rule(
            "shortened_urls",
            vec![any(&["shortened url", "bit.ly", "tinyurl"])],
            "Shortened URLs hide the real destination and are frequently used in phishing \
             attacks. It's safer to expand them or avoid clicking unknown shortened links.",
        ),
        rule(
            "brand_abuse",
            vec![all(&["brand name", "phishing"]), all(&["brand names", "urls"])],
            "Phishing URLs often embed brand names like 'paypal', 'bank', or 'google' to \
             trick users into trusting the link. For example, paypal-login-secure.com is not \
             the same as paypal.com.",
        ),
        // ── Zero-day phishing ───────────────────────────────────────────
        rule(
            "zero_day_detection_difficulty",
            vec![all(&["zero day", "hard"]), all(&["zero day", "difficult"])],
            "Zero-day phishing is hard to detect because these URLs are new and unknown. \
             Blacklists only contain previously reported URLs, so we need ML-based detection \
             that looks at URL patterns instead.",
        ),
        rule(
            "zero_day_definition",
            vec![any(&["what is zero day", "zero-day phishing", "zero day phishing"])],
            "Zero-day phishing refers to newly created phishing URLs that are not yet listed \
             in blacklists or threat databases. They are harder to detect using traditional \
             methods.",
        ),
        // ── Detection techniques ────────────────────────────────────────
        rule(
            "blacklist_detection",
            vec![all(&["blacklist", "phishing"])],
            "Blacklist-based detection compares URLs against a database of known phishing \
             sites. It's simple but fails against zero-day or slightly modified phishing \
             URLs.",
        ),
        rule(
            "traditional_methods",
            vec![all(&["traditional methods"]), all(&["old methods", "phishing"])],
            "Traditional phishing detection often relied on blacklists, whitelists, and \
             fixed rules. These methods are fast but weak against new or obfuscated phishing \
             links.",
        ),
        // ── Lexical features ────────────────────────────────────────────
        rule(
            "lexical_feature_definition",
            vec![any(&["what are lexical features", "lexical features in url"])],
            "Lexical features are text-based properties of the URL itself, such as URL \
             length, number of dots, hyphens, digits, special characters, subdomains, and \
             presence of suspicious words.",
        ),
        rule(
            "lexical_feature_examples",
            vec![any(&["examples of lexical features", "lexical feature examples"])],
            "Examples of lexical features: URL length, domain length, path length, number of \
             digits, number of dots, number of hyphens, presence of '@', use of IP addresses, \
             and suspicious tokens like 'login' or 'secure'.",
        ),
        rule(
            "lexical_feature_value",
            vec![any(&["why lexical features useful", "benefit of lexical features"])],
            "Lexical features are useful because they are fast to compute and do not require \
             external lookups. Many phishing URLs follow detectable lexical patterns such as \
             long length, many symbols, and tricky subdomains.",
        ),
        // ── Semantic intention mapping ──────────────────────────────────
        rule(
            "semantic_mapping_example",
            vec![any(&["semantic example", "example of semantic"])],
            "Example: paypal.com/login is a legitimate login URL, but \
             paypal-login-secure-update.com is likely phishing. Both contain 'paypal' and \
             'login', but the second one is a fake domain misusing the brand name.",
        ),
        rule(
            "semantic_mapping",
            vec![all(&["semantic intention mapping"]), all(&["semantic", "url"])],
            "Semantic intention mapping means analyzing the meaning and intent of words \
             inside the URL, such as 'login', 'secure', or 'update', and checking if their \
             usage matches the genuine purpose of the domain or looks misleading.",
        ),
        // ── Machine learning / XGBoost ──────────────────────────────────
        rule(
            "ml_definition",
            vec![any(&["what is machine learning", "what is ml"])],
            "Machine learning is a technique where models learn patterns from data instead \
             of relying only on fixed rules. In phishing detection, ML can generalize to \
             unseen URLs.",
        ),
        rule(
            "algorithm_choice",
            vec![all(&["which algorithm", "project"])],
            "In this project, we use algorithms like XGBoost for classification of URLs as \
             phishing or legitimate based on features extracted from them.",
        ),
        rule(
            "xgboost_definition",
            vec![any(&["what is xgboost", "explain xgboost"])],
            "XGBoost (Extreme Gradient Boosting) is a powerful machine learning algorithm \
             based on decision tree ensembles. It is fast, handles large feature sets well, \
             and achieves high accuracy in classification tasks like phishing detection.",
        ),
        rule(
            "xgboost_rationale",
            vec![any(&["why xgboost", "why did you choose xgboost"])],
            "We chose XGBoost because it performs very well on tabular feature-based data, \
             supports regularization to reduce overfitting, and is widely used in security \
             and Kaggle competitions for its accuracy.",
        ),
        // ── Dataset / training ──────────────────────────────────────────
        rule(
            "dataset",
            vec![any(&["which dataset", "what dataset", "dataset used"])],
            "We used a phishing URL dataset containing lexical features and labels \
             indicating whether each URL is phishing or legitimate. It includes features \
             like length, special character counts, and domain-related metrics.",
        ),
        rule(
            "dataset_value",
            vec![any(&["why dataset important", "role of dataset"])],
            "The dataset is important because the ML model learns patterns of phishing vs \
             legitimate URLs from it. The quality and diversity of data directly impact \
             model accuracy.",
        ),
        rule(
            "train_test_split",
            vec![any(&["train test split", "training and testing data"])],
            "We split the dataset into training and testing sets. The training set teaches \
             the model, and the testing set evaluates how well it performs on unseen data.",
        ),
        // ── Model output / confidence ───────────────────────────────────
        rule(
            "model_output",
            vec![all(&["model output"])],
            "The model outputs a class label (phishing or legitimate) and a probability \
             score indicating how confident the model is about that prediction.",
        ),
        rule(
            "confidence_score",
            vec![all(&["confidence score"])],
            "A confidence score is a probability value between 0 and 1 that shows how sure \
             the model is about its prediction. Higher scores mean higher confidence.",
        ),
        // ── Project workflow ────────────────────────────────────────────
        rule(
            "project_overview",
            vec![any(&[
                "explain project",
                "how does this project work",
                "system workflow",
            ])],
            "Our system takes a URL as input, extracts lexical and structural features, \
             feeds them into an ML model like XGBoost, and classifies the URL as phishing \
             or legitimate. The frontend shows the result with a confidence score and \
             safety tips.",
        ),
        rule(
            "architecture",
            vec![any(&["architecture", "system design"])],
            "The architecture includes a frontend for user interaction, a backend service \
             that invokes the classifier, and an ML model (XGBoost) trained on lexical \
             phishing datasets.",
        ),
        rule(
            "dashboard",
            vec![any(&["dashboard", "analytics"])],
            "The dashboard page shows analytics like number of URLs scanned, ratio of \
             phishing vs legitimate URLs, and recent scan history using charts and tables.",
        ),
        // ── User safety ─────────────────────────────────────────────────
        rule(
            "staying_safe",
            vec![any(&["how to stay safe", "avoid phishing", "protect myself"])],
            "To stay safe: verify domain names carefully, avoid clicking unknown or \
             shortened links, enable 2FA, never share OTPs or passwords, and access banking \
             or login pages by typing the official URL manually.",
        ),
        rule(
            "clicked_phishing_link",
            vec![any(&[
                "clicked on phishing link",
                "what if i click",
                "i clicked a phishing",
            ])],
            "If you clicked a phishing link, immediately change your passwords, log out \
             from all devices, enable 2FA, and inform your bank or service provider if any \
             financial data was involved.",
        ),
    ]
}
