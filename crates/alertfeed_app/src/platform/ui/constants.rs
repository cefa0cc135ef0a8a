/// Identifies one widget of the dashboard surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u32);

impl ControlId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

pub const LABEL_USER_NAME: ControlId = ControlId::new(1001);
pub const LABEL_USER_EMAIL: ControlId = ControlId::new(1002);
pub const LABEL_USER_AVATAR: ControlId = ControlId::new(1003);

pub const LABEL_TOTAL_ALERTS: ControlId = ControlId::new(1101);
pub const LABEL_WEEK_ALERTS: ControlId = ControlId::new(1102);
pub const LABEL_WEBSITES: ControlId = ControlId::new(1103);
pub const LABEL_NEXT_DEADLINE: ControlId = ControlId::new(1104);
pub const LABEL_NEXT_DEADLINE_JOB: ControlId = ControlId::new(1105);
pub const LABEL_MATCH_RATE: ControlId = ControlId::new(1106);
pub const LABEL_SUMMARY_ERROR: ControlId = ControlId::new(1107);
pub const LIST_CHART_PER_DAY: ControlId = ControlId::new(1201);
pub const LIST_CHART_PER_CATEGORY: ControlId = ControlId::new(1202);

pub const SELECT_CATEGORY: ControlId = ControlId::new(1301);
pub const SELECT_SORT: ControlId = ControlId::new(1302);
pub const INPUT_SEARCH: ControlId = ControlId::new(1303);
pub const BUTTON_REFRESH: ControlId = ControlId::new(1304);
pub const LIST_ALERTS: ControlId = ControlId::new(1401);
pub const LABEL_ALERTS_STATUS: ControlId = ControlId::new(1402);
pub const BUTTON_ARCHIVE: ControlId = ControlId::new(1403);
pub const LABEL_PAGINATION: ControlId = ControlId::new(1501);
pub const BUTTON_PREV_PAGE: ControlId = ControlId::new(1502);
pub const BUTTON_NEXT_PAGE: ControlId = ControlId::new(1503);

pub const LIST_SITES: ControlId = ControlId::new(1601);
pub const LABEL_SITES_STATUS: ControlId = ControlId::new(1602);
pub const BUTTON_SCRAPE: ControlId = ControlId::new(1603);
pub const BUTTON_REMOVE_SITE: ControlId = ControlId::new(1604);
pub const LABEL_URL_ERROR: ControlId = ControlId::new(1605);
pub const LIST_ACTIVITY: ControlId = ControlId::new(1701);
pub const LABEL_ACTIVITY_STATUS: ControlId = ControlId::new(1702);

pub const PANEL_PREFERENCES: ControlId = ControlId::new(2001);
pub const BUTTON_OPEN_PREFERENCES: ControlId = ControlId::new(2002);
pub const BUTTON_CLOSE_PREFERENCES: ControlId = ControlId::new(2003);
pub const LIST_CATEGORIES: ControlId = ControlId::new(2004);
pub const LABEL_AGES: ControlId = ControlId::new(2005);
pub const LIST_LOCATIONS: ControlId = ControlId::new(2006);
pub const INPUT_LOCATION: ControlId = ControlId::new(2007);
pub const LABEL_CATEGORY_ERROR: ControlId = ControlId::new(2008);
pub const LABEL_AGE_ERROR: ControlId = ControlId::new(2009);
pub const LIST_SUGGESTIONS: ControlId = ControlId::new(2010);
pub const BUTTON_SAVE_PREFERENCES: ControlId = ControlId::new(2011);
pub const BUTTON_SKIP_OPTIONAL: ControlId = ControlId::new(2012);
pub const LABEL_SAVE_STATUS: ControlId = ControlId::new(2013);
pub const LABEL_DRAFT_STATUS: ControlId = ControlId::new(2014);
pub const PANEL_ONBOARDING: ControlId = ControlId::new(2015);
pub const BUTTON_DISMISS_ONBOARDING: ControlId = ControlId::new(2016);

pub const PANEL_TOASTS: ControlId = ControlId::new(3001);
