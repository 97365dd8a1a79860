use std::collections::HashMap;
use sysproxy::{EnvironmentProvider, Protocol, ProxyProvider};

#[test]
fn single_queries_agree_with_get_all() {
    let all = match sysproxy::get_all() {
        Ok(all) => all,
        Err(err) => {
            eprintln!("system proxy settings unavailable, skipping: {err}");
            return;
        }
    };

    for (protocol, record) in all.iter() {
        println!("{protocol} proxy: {record}");
    }

    assert_eq!(sysproxy::get_http().unwrap(), all.http);
    assert_eq!(sysproxy::get_https().unwrap(), all.https);
    assert_eq!(sysproxy::get_socks().unwrap(), all.socks);
    assert_eq!(sysproxy::is_enabled().unwrap(), !all.is_empty());
}

#[test]
fn system_provider_matches_free_functions() {
    let provider = sysproxy::system_proxy::system_provider();
    let Ok(all) = provider.fetch_all() else {
        return;
    };
    assert_eq!(sysproxy::get_all().unwrap(), all);
}

#[test]
fn environment_provider_with_custom_table() {
    let table: HashMap<&str, &str> = HashMap::from([
        ("HTTP_PROXY", "http://10.1.1.1:3128"),
        ("https_proxy", "10.1.1.2:3129"),
        ("all_proxy", "socks5://10.1.1.3:1080"),
    ]);
    let provider =
        EnvironmentProvider::with_lookup(move |name| table.get(name).map(|v| v.to_string()));

    let all = provider.fetch_all().unwrap();
    assert_eq!(all.http.as_ref().unwrap().to_string(), "http://10.1.1.1:3128");
    assert_eq!(all.https.as_ref().unwrap().to_string(), "https://10.1.1.2:3129");
    assert_eq!(all.get(Protocol::Socks).unwrap().port(), 1080);
    assert!(provider.is_enabled().unwrap());

    let (http, https, socks) = all.into();
    assert!(http.is_some() && https.is_some() && socks.is_some());
}
