//! Shared fixtures for integration tests

/// A complete two-company feed in the publisher's shape. "ACME Gas"
/// carries every natural-gas field; "Lakeview Energy" additionally
/// carries the legacy electricity rates.
pub const FULL_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<NewDataSet>
  <GasBillData>
    <Dist>ACME Gas</Dist>
    <MC>24.50</MC>
    <CM>0.118235</CM>
    <CMPA>-0.0075</CMPA>
    <TC>0.0392</TC>
    <TCPA>0.0021</TCPA>
    <DCPA>-0.0013</DCPA>
    <FacCC>0.0095</FacCC>
    <FedCC>0.0391</FedCC>
    <GST>5</GST>
    <DCT1>0.2433</DCT1>
    <DCT1Start>0</DCT1Start>
    <DCT1End>30</DCT1End>
    <DCT2>0.2167</DCT2>
    <DCT2Start>30</DCT2Start>
    <DCT2End>85</DCT2End>
    <DCT3>0.2041</DCT3>
    <DCT3Start>85</DCT3Start>
    <DCT3End>170</DCT3End>
    <DCT4>0.1965</DCT4>
    <DCT4Start>170</DCT4Start>
    <DCT4End>99999</DCT4End>
  </GasBillData>
  <GasBillData>
    <Dist>Lakeview Energy</Dist>
    <MC>21.00</MC>
    <CM>0.1309</CM>
    <CMPA>0.0000</CMPA>
    <TC>0.0455</TC>
    <TCPA>-0.0018</TCPA>
    <DCPA>0.0007</DCPA>
    <FacCC>0.0101</FacCC>
    <FedCC>0.0391</FedCC>
    <GST>5</GST>
    <DCT1>0.2218</DCT1>
    <DCT1Start>0</DCT1Start>
    <DCT1End>55</DCT1End>
    <DCT2>0.2105</DCT2>
    <DCT2Start>55</DCT2Start>
    <DCT2End>120</DCT2End>
    <DCT3>0.1998</DCT3>
    <DCT3Start>120</DCT3Start>
    <DCT3End>250</DCT3End>
    <DCT4>0.1876</DCT4>
    <DCT4Start>250</DCT4Start>
    <DCT4End>99999</DCT4End>
    <OffPeakRate>0.074</OffPeakRate>
    <MidPeakRate>0.102</MidPeakRate>
    <OnPeakRate>0.151</OnPeakRate>
  </GasBillData>
</NewDataSet>"#;
