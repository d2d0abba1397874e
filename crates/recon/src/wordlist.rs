//! Built-in candidate labels used when no wordlist file is given.

pub const DEFAULT_WORDLIST: &[&str] = &[
    "www", "mail", "ftp", "admin", "api", "blog", "cdn", "dev", "staging", "test", "secure",
    "vpn", "portal", "docs", "support", "webmail", "imap", "smtp", "pop", "ns1", "ns2", "mx",
    "www2", "shop", "store", "app", "mobile", "m", "old", "new", "beta", "alpha", "demo",
    "staging2", "test2", "backup", "db", "mysql", "postgres", "redis", "cache", "static",
    "assets", "media", "images", "img", "video", "videos", "download", "downloads", "files",
    "file", "upload", "uploads", "share", "shared", "public", "private", "web", "web2", "www3",
    "mail2", "smtp2", "imap2", "pop3", "exchange", "owa", "autodiscover", "lync", "skype",
    "teams", "ns", "ns3", "ns4", "dns", "dns1", "dns2", "mx1", "mx2", "mail1", "mail3", "web1",
    "web3", "www1", "www4", "cdn1", "cdn2", "cdn3", "static1", "static2", "assets1", "assets2",
    "media1", "media2", "images1", "images2", "files1", "files2", "imap4", "activesync",
    "lyncdiscover", "sip", "sipfederationtls", "meet", "zoom", "webex", "gotomeeting", "join",
    "joinme", "dev1", "dev2", "development", "staging1", "test1", "testing", "qa", "qa1", "qa2",
    "preprod", "prod", "production", "prod1", "prod2", "live", "live1", "live2", "demo1",
    "demo2", "sandbox", "sandbox1", "sandbox2", "app1", "app2", "apps", "application",
    "applications", "webapp", "webapp1", "webapp2", "mobile1", "mobile2", "m1", "m2", "api1",
    "api2", "apis", "rest", "restapi", "graphql", "graph", "v1", "v2", "v3", "version1",
    "version2", "version3", "blogs", "news", "news1", "news2", "articles", "posts", "content",
    "content1", "content2", "cms", "cms1", "cms2", "wp", "wordpress", "drupal", "joomla",
    "magento", "shopify", "woocommerce", "shops", "stores", "store1", "store2", "ecommerce",
    "ecom", "cart", "checkout", "payment", "payments", "billing", "invoice", "invoices",
    "orders", "order", "customer", "customers", "account", "accounts", "secure1", "secure2",
    "security", "vpn1", "vpn2", "vpn3", "ssl", "tls", "cert", "certificate", "certs", "ca",
    "pki", "key", "keys", "auth", "auth1", "auth2", "authentication", "login", "logins",
    "signin", "signup", "register", "registration", "user", "users", "admin1", "admin2",
    "administrator", "admins", "root", "sudo", "db1", "db2", "database", "databases", "mysql1",
    "mysql2", "postgres1", "postgres2", "postgresql", "mongo", "mongo1", "mongo2", "mongodb",
    "redis1", "redis2", "cache1", "cache2", "memcached", "memcache", "elastic", "elasticsearch",
    "es", "es1", "es2", "solr", "solr1", "solr2", "kibana", "grafana", "prometheus",
    "monitoring", "aws", "aws1", "aws2", "amazon", "s3", "s3bucket", "ec2", "lambda",
    "cloudfront", "azure", "azure1", "azure2", "microsoft", "gcp", "gcp1", "gcp2", "google",
    "cloud", "cloud1", "cloud2", "cloudflare", "cf", "cf1", "cf2", "static3", "assets3", "img1",
    "img2", "pics", "pictures", "video1", "video2", "stream", "streaming", "stream1", "file1",
    "file2", "upload1", "upload2", "download1", "download2", "sharing", "share1", "share2",
    "public1", "private1", "private2", "internal", "internal1", "internal2", "email", "emails",
    "email1", "email2", "smtp1", "pop1", "pop2", "imap1", "exchange1", "exchange2", "owa1",
    "sync", "sync1", "sync2", "collab", "collaboration", "team", "team1", "team2", "sharepoint",
    "sp", "sp1", "sp2", "confluence", "jira", "jira1", "jira2", "slack", "slack1", "discord",
    "discord1", "mattermost", "mattermost1", "monitor", "monitor1", "monitor2", "stats",
    "statistics", "stats1", "stats2", "analytics", "analytics1", "analytics2", "tracking",
    "track", "track1", "track2", "log", "logs", "logging", "log1", "log2", "syslog", "syslog1",
    "syslog2", "docs1", "docs2", "documentation", "doc", "doc1", "doc2", "wiki", "wiki1",
    "wiki2", "help", "help1", "help2", "support1", "support2", "faq", "faqs", "guide", "guides",
    "manual", "manuals", "tutorial", "tutorials", "marketing", "marketing1", "marketing2",
    "campaign", "campaigns", "promo", "promos", "promotion", "promotions", "ad", "ads",
    "advertising", "advert", "newsletter", "newsletters", "subscribe", "subscription", "sub",
    "subs", "ticket", "tickets", "ticketing", "service", "services", "service1", "service2",
    "client", "clients", "client1", "client2", "old1", "old2", "new1", "new2", "legacy",
    "legacy1", "legacy2", "archive", "archives", "archive1", "archive2", "backups", "backup1",
    "backup2", "temp", "temp1", "temp2", "temporary", "tmp", "tmp1", "tmp2", "tests", "us",
    "usa", "uk", "eu", "eu1", "eu2", "asia", "asia1", "asia2", "apac", "emea", "emea1", "emea2",
    "na", "na1", "na2", "sa", "sa1", "sa2", "ny", "ny1", "ny2", "nyc", "sf", "sf1", "sf2", "la",
    "la1", "la2", "london", "london1", "london2", "tokyo", "tokyo1", "tokyo2", "singapore",
    "singapore1", "singapore2", "sydney", "sydney1", "sydney2", "1", "2", "3", "4", "5", "6",
    "7", "8", "9", "10", "01", "02", "03", "04", "05", "06", "07", "08", "09", "my", "my1",
    "my2", "your", "your1", "your2", "our", "our1", "our2", "get", "get1", "get2", "go", "go1",
    "go2", "try", "try1", "try2", "use", "use1", "use2", "access", "access1", "access2",
    "connect", "openvpn", "remote", "rdp", "ssh", "telnet",
];

#[cfg(test)]
mod tests {
    use super::DEFAULT_WORDLIST;
    use crate::validate::is_valid_label;
    use std::collections::HashSet;

    #[test]
    fn labels_are_valid_and_distinct() {
        let distinct: HashSet<&str> = DEFAULT_WORDLIST.iter().copied().collect();
        assert_eq!(distinct.len(), DEFAULT_WORDLIST.len());
        assert!(DEFAULT_WORDLIST.iter().all(|label| is_valid_label(label)));
    }
}
