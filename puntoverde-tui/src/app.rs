use std::sync::Arc;

use puntoverde_core::{
    model::{Coordinate, DirectoryEntry, RegionId, ResolvedLocation},
    service::PuntoVerdeService,
};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Screen {
    RegionSelect,
    CenterList,
    CenterDetail,
}

pub(crate) struct App {
    pub service: Arc<PuntoVerdeService>,

    pub screen: Screen,
    pub regions: Vec<(RegionId, String)>,
    pub region_list_index: usize,
    /// `None` means "all regions".
    pub selected_region: Option<RegionId>,

    pub resolved: Option<ResolvedLocation>,

    pub centers: Vec<DirectoryEntry>,
    pub center_list_index: usize,
    pub selected_center: Option<DirectoryEntry>,

    pub is_loading: bool,
}

impl App {
    pub(crate) fn new(service: Arc<PuntoVerdeService>) -> Self {
        let regions = service.regions();
        Self {
            service,
            screen: Screen::RegionSelect,
            regions,
            region_list_index: 0,
            selected_region: None,
            resolved: None,
            centers: Vec::new(),
            center_list_index: 0,
            selected_center: None,
            is_loading: false,
        }
    }

    /// Rows in the region list, including the "all regions" row at index 0.
    pub(crate) fn region_rows(&self) -> usize {
        self.regions.len() + 1
    }

    pub(crate) fn region_at(&self, index: usize) -> Option<RegionId> {
        if index == 0 {
            return None;
        }
        self.regions.get(index - 1).map(|(id, _name)| id.clone())
    }

    pub(crate) fn region_label(&self, index: usize) -> &str {
        if index == 0 {
            "All regions"
        } else {
            self.regions
                .get(index - 1)
                .map_or("<region>", |(_id, name)| name.as_str())
        }
    }

    /// Coordinate the current resolution is anchored to, for distance sorting.
    pub(crate) fn anchor(&self) -> Option<Coordinate> {
        self.resolved.as_ref().map(|resolved| resolved.coordinate)
    }

    /// Adopt a fresh resolution: preselect its region and show its centers.
    pub(crate) fn apply_resolution(&mut self, resolved: ResolvedLocation) {
        self.region_list_index = self
            .regions
            .iter()
            .position(|(id, _name)| *id == resolved.region)
            .map_or(0, |position| position + 1);
        self.selected_region = Some(resolved.region.clone());
        self.resolved = Some(resolved);
        self.reload_centers();
        self.screen = Screen::CenterList;
    }

    pub(crate) fn select_current_region(&mut self) {
        self.selected_region = self.region_at(self.region_list_index);
        self.reload_centers();
        self.screen = Screen::CenterList;
    }

    pub(crate) fn open_current_center(&mut self) {
        if let Some(center) = self.centers.get(self.center_list_index) {
            self.selected_center = Some(center.clone());
            self.screen = Screen::CenterDetail;
        }
    }

    fn reload_centers(&mut self) {
        self.center_list_index = 0;
        self.centers = match (&self.selected_region, self.anchor()) {
            (Some(region), Some(from)) => self
                .service
                .centers_near(region, from)
                .into_iter()
                .cloned()
                .collect(),
            (Some(region), None) => self.service.centers_in(region).to_vec(),
            (None, _) => self.service.all_centers().into_iter().cloned().collect(),
        };
    }
}
