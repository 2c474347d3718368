use crate::models::search_config::SearchConfig;

/// Query parameters for one page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub start: u32,
    pub params: Vec<(&'static str, String)>,
}

impl PageRequest {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Build the query for the page starting at `start`.
/// Optional filters are only sent when set.
pub fn build_search_params(config: &SearchConfig, start: u32) -> PageRequest {
    let mut params = vec![
        ("keywords", config.keywords.clone()),
        ("location", config.location.clone()),
        ("distance", config.distance.to_string()),
        ("pageNum", "0".to_string()),
        ("start", start.to_string()),
    ];

    if let Some(work_type) = config.work_type {
        params.push(("f_WT", work_type.code().to_string()));
    }
    if !config.experience_levels.is_empty() {
        params.push(("f_E", config.experience_levels.clone()));
    }
    if config.easy_apply {
        params.push(("f_AL", "true".to_string()));
    }
    if !config.company_ids.is_empty() {
        let ids: Vec<String> = config.company_ids.iter().map(u64::to_string).collect();
        params.push(("f_C", ids.join(",")));
    }
    if let Some(hours) = config.hours_old {
        let seconds = u64::from(hours) * 3600;
        params.push(("f_TPR", format!("r{seconds}")));
    }

    PageRequest { start, params }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::search_config::WorkType;

    #[test]
    fn always_sends_core_fields() {
        let mut cfg = SearchConfig::new("engineer", "Remote");
        cfg.experience_levels = String::new();
        cfg.hours_old = None;

        let req = build_search_params(&cfg, 30);
        assert_eq!(
            req.params,
            vec![
                ("keywords", "engineer".to_string()),
                ("location", "Remote".to_string()),
                ("distance", "25".to_string()),
                ("pageNum", "0".to_string()),
                ("start", "30".to_string()),
            ]
        );
        assert_eq!(req.start, 30);
    }

    #[test]
    fn disabled_filters_are_omitted() {
        let mut cfg = SearchConfig::new("engineer", "Remote");
        cfg.experience_levels = String::new();
        cfg.hours_old = None;

        let req = build_search_params(&cfg, 0);
        for key in ["f_WT", "f_E", "f_AL", "f_C", "f_TPR"] {
            assert!(req.get(key).is_none(), "{key} should be absent");
        }
    }

    #[test]
    fn enabled_filters_are_encoded() {
        let mut cfg = SearchConfig::new("engineer", "Remote");
        cfg.work_type = Some(WorkType::Hybrid);
        cfg.easy_apply = true;
        cfg.company_ids = vec![1035, 1441];
        cfg.hours_old = Some(48);

        let req = build_search_params(&cfg, 0);
        assert_eq!(req.get("f_WT"), Some("3"));
        assert_eq!(req.get("f_E"), Some("2,3"));
        assert_eq!(req.get("f_AL"), Some("true"));
        assert_eq!(req.get("f_C"), Some("1035,1441"));
        assert_eq!(req.get("f_TPR"), Some("r172800"));
    }
}
