//! Amateur band table.

/// One amateur band: inclusive frequency range in MHz and its ADIF name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower_mhz: f64,
    pub upper_mhz: f64,
    pub name: &'static str,
}

impl Band {
    const fn new(lower_mhz: f64, upper_mhz: f64, name: &'static str) -> Self {
        Self { lower_mhz, upper_mhz, name }
    }

    /// True if `mhz` lies within the band edges (inclusive).
    #[inline]
    pub fn contains(&self, mhz: f64) -> bool {
        mhz >= self.lower_mhz && mhz <= self.upper_mhz
    }
}

/// Amateur bands in ascending frequency order.
pub static BANDS: [Band; 30] = [
    Band::new(0.1357, 0.1378, "2190m"),
    Band::new(0.472, 0.479, "630m"),
    Band::new(0.501, 0.504, "560m"),
    Band::new(1.8, 2.0, "160m"),
    Band::new(3.5, 4.0, "80m"),
    Band::new(5.06, 5.45, "60m"),
    Band::new(7.0, 7.3, "40m"),
    Band::new(10.1, 10.15, "30m"),
    Band::new(14.0, 14.35, "20m"),
    Band::new(18.068, 18.168, "17m"),
    Band::new(21.0, 21.45, "15m"),
    Band::new(24.890, 24.99, "12m"),
    Band::new(28.0, 29.7, "10m"),
    Band::new(50.0, 54.0, "6m"),
    Band::new(70.0, 71.0, "4m"),
    Band::new(144.0, 148.0, "2m"),
    Band::new(222.0, 225.0, "1.25m"),
    Band::new(420.0, 450.0, "70cm"),
    Band::new(902.0, 928.0, "33cm"),
    Band::new(1240.0, 1300.0, "23cm"),
    Band::new(2300.0, 2450.0, "13cm"),
    Band::new(3300.0, 3500.0, "9cm"),
    Band::new(5650.0, 5925.0, "6cm"),
    Band::new(10000.0, 10500.0, "3cm"),
    Band::new(24000.0, 24250.0, "1.25cm"),
    Band::new(47000.0, 47200.0, "6mm"),
    Band::new(75500.0, 81000.0, "4mm"),
    Band::new(119980.0, 120020.0, "2.5mm"),
    Band::new(142000.0, 149000.0, "2mm"),
    Band::new(241000.0, 250000.0, "1mm"),
];

/// Band name for a frequency in MHz, or `None` outside every band.
///
/// ```
/// assert_eq!(adif_core::freq_to_band(14.074), Some("20m"));
/// assert_eq!(adif_core::freq_to_band(15.0), None);
/// ```
pub fn freq_to_band(mhz: f64) -> Option<&'static str> {
    BANDS.iter().find(|band| band.contains(mhz)).map(|band| band.name)
}
