/// A small input document.
pub const NOTE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<note>
  <to>Tove</to>
  <from>Jani</from>
  <body>Don't forget me this weekend!</body>
</note>"#;

/// Stylesheet turning [`NOTE_XML`] into a one-page XSL-FO document.
pub const NOTE_XSL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xsl:stylesheet version="1.0"
                xmlns:xsl="http://www.w3.org/1999/XSL/Transform"
                xmlns:fo="http://www.w3.org/1999/XSL/Format">
  <xsl:output method="xml" indent="yes"/>
  <xsl:template match="/">
    <fo:root>
      <fo:layout-master-set>
        <fo:simple-page-master master-name="A4" page-width="210mm" page-height="297mm">
          <fo:region-body margin="20mm"/>
        </fo:simple-page-master>
      </fo:layout-master-set>
      <fo:page-sequence master-reference="A4">
        <fo:flow flow-name="xsl-region-body">
          <fo:block font-size="18pt">To: <xsl:value-of select="note/to"/></fo:block>
          <fo:block>From: <xsl:value-of select="note/from"/></fo:block>
          <fo:block><xsl:value-of select="note/body"/></fo:block>
        </fo:flow>
      </fo:page-sequence>
    </fo:root>
  </xsl:template>
</xsl:stylesheet>"#;

/// Unterminated start tag.
pub const BROKEN_XSL: &str = r#"<?xml version="1.0"?>
<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform"
  <xsl:template match="/"/>
</xsl:stylesheet>"#;

/// Pulls in another stylesheet from disk.
pub const INCLUDING_XSL: &str = r#"<?xml version="1.0"?>
<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
  <xsl:include href="/etc/render-gateway/shared.xsl"/>
</xsl:stylesheet>"#;

/// Declares an external entity pointing at a local file.
pub const XXE_XML: &str = r#"<?xml version="1.0"?>
<!DOCTYPE note [<!ENTITY secret SYSTEM "file:///etc/passwd">]>
<note><body>&secret;</body></note>"#;

/// Uses an internal DTD subset for a named character entity.
pub const NBSP_XML: &str = r#"<?xml version="1.0"?>
<!DOCTYPE note [<!ENTITY nbsp "&#160;">]>
<note><to>Tove&nbsp;Larsen</to><from>Jani</from><body>Hi</body></note>"#;

/// Reads a lookup table embedded in the stylesheet through `document('')`.
pub const LOOKUP_XSL: &str = r#"<?xml version="1.0"?>
<xsl:stylesheet version="1.0"
                xmlns:xsl="http://www.w3.org/1999/XSL/Transform"
                xmlns:fo="http://www.w3.org/1999/XSL/Format"
                xmlns:l="urn:render-gateway:lookup">
  <l:greeting lang="en">Hello</l:greeting>
  <xsl:template match="/">
    <fo:root>
      <fo:block><xsl:value-of select="document('')/*/l:greeting[@lang = 'en']"/></fo:block>
    </fo:root>
  </xsl:template>
</xsl:stylesheet>"#;

/// Reads an arbitrary file through `document()`.
pub const FILE_READING_XSL: &str = r#"<?xml version="1.0"?>
<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
  <xsl:template match="/"><xsl:copy-of select="document('file:///etc/passwd')"/></xsl:template>
</xsl:stylesheet>"#;

/// [`NOTE_XML`] with a non-ASCII name, encoded as declared in ISO-8859-1.
pub fn latin1_note() -> Vec<u8> {
    let mut bytes = br#"<?xml version="1.0" encoding="ISO-8859-1"?>
<note><to>Jos"#
        .to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b"</to><from>Jani</from><body>Ol\xE1</body></note>");
    bytes
}

/// Bytes that are not a font but are fine for exercising storage.
pub fn font_bytes(tag: &str) -> Vec<u8> {
    let mut bytes = vec![0x00, 0x01, 0x00, 0x00];
    bytes.extend_from_slice(tag.as_bytes());
    bytes
}
